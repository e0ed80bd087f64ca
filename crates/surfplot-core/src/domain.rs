//! Sampling a scalar function over a rectangular grid of its input space.

use itertools::{iproduct, Itertools};
use nalgebra as na;

use crate::{error::ConfigError, PlotError};

/// Largest number of grid points allowed along one axis (time included).
pub const MAX_GRID_POINTS: usize = 1 << 12;

/// Largest number of function evaluations allowed in one call to [`sample`].
pub const MAX_FIELD_SAMPLES: u64 = 1 << 24;

/// How far past `max`, in units of machine epsilon relative to the endpoints,
/// the last grid point may land and still count as `max` itself.
/// Covers rounding in `min + i * step`, e.g. `3. * 0.1 > 0.3`.
const ENDPOINT_ULPS: f64 = 4.;

/// An axis of the sampled space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The first input variable.
    X,
    /// The second input variable.
    Y,
    /// The time variable.
    Time,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Time => write!(f, "time"),
        }
    }
}

/// A closed interval `[min, max]` of one input variable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    /// Lower end of the interval.
    pub min: f64,
    /// Upper end of the interval.
    pub max: f64,
}

impl Interval {
    /// Create an interval. Validity is checked when the interval
    /// is given to a [`Surface`][crate::Surface] or [`sample`].
    #[inline]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn validate(&self, axis: Axis) -> Result<(), ConfigError> {
        crate::error::ensure_finite("interval min", self.min)?;
        crate::error::ensure_finite("interval max", self.max)?;
        if self.min < self.max {
            Ok(())
        } else {
            Err(ConfigError::EmptyInterval {
                axis,
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Number of grid points in the interval with the given spacing,
    /// `floor((max - min) / step) + 1`.
    ///
    /// If the step doesn't divide the interval evenly,
    /// the last point falls short of `max`.
    /// A point within a few ulps of `max` counts as landing on it.
    /// Saturates at `usize::MAX` for spans too large to count.
    #[inline]
    pub fn grid_len(&self, step: f64) -> usize {
        grid_len(self.min, self.max, step)
    }

    /// Iterate over the grid points of the interval with the given spacing.
    pub fn grid_points(&self, step: f64) -> impl Iterator<Item = f64> + '_ {
        let min = self.min;
        (0..self.grid_len(step)).map(move |i| min + i as f64 * step)
    }
}

/// Number of points `min + i * step` that don't go past `max`.
fn grid_len(min: f64, max: f64, step: f64) -> usize {
    let steps = ((max - min) / step).floor();
    // NaN fails this too
    if !(steps >= 0.) {
        return 1;
    }
    if steps >= usize::MAX as f64 {
        return usize::MAX;
    }

    let slack = ENDPOINT_ULPS * f64::EPSILON * min.abs().max(max.abs());
    let fits = |n: f64| min + n * step <= max + slack;
    // the division is off by at most one step in either direction
    let steps = if fits(steps + 1.) {
        steps + 1.
    } else if steps > 0. && !fits(steps) {
        steps - 1.
    } else {
        steps
    };
    (steps as usize).saturating_add(1)
}

/// Check that a grid from `min` to `max` is small enough to sample.
fn validate_grid_len(axis: Axis, min: f64, max: f64, step: f64) -> Result<(), ConfigError> {
    let span = max - min;
    if span.is_finite() && grid_len(min, max, step) <= MAX_GRID_POINTS {
        Ok(())
    } else {
        Err(ConfigError::GridTooLarge { axis, span, step })
    }
}

/// Grid spacing along the two input axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution {
    /// Spacing along the x axis.
    pub x: f64,
    /// Spacing along the y axis.
    pub y: f64,
}

impl Resolution {
    /// The same spacing along both axes.
    #[inline]
    pub const fn uniform(step: f64) -> Self {
        Self { x: step, y: step }
    }
}

/// The rectangular region of input space that gets sampled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    /// Range of the x variable. Default: `[-10, 10]`.
    pub x: Interval,
    /// Range of the y variable. Default: `[-10, 10]`.
    pub y: Interval,
    /// Grid spacing. Default: 1 along both axes.
    pub resolution: Resolution,
}

impl Default for Domain {
    fn default() -> Self {
        Self {
            x: Interval::new(-10., 10.),
            y: Interval::new(-10., 10.),
            resolution: Resolution::uniform(1.),
        }
    }
}

impl Domain {
    /// Check that both intervals are non-empty, both resolutions positive
    /// and neither axis has more than [`MAX_GRID_POINTS`] grid points.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.x.validate(Axis::X)?;
        self.y.validate(Axis::Y)?;
        validate_resolution(Axis::X, self.resolution.x)?;
        validate_resolution(Axis::Y, self.resolution.y)?;
        validate_grid_len(Axis::X, self.x.min, self.x.max, self.resolution.x)?;
        validate_grid_len(Axis::Y, self.y.min, self.y.max, self.resolution.y)?;
        Ok(())
    }

    /// Number of grid points along the x and y axes.
    #[inline]
    pub fn grid_shape(&self) -> (usize, usize) {
        (
            self.x.grid_len(self.resolution.x),
            self.y.grid_len(self.resolution.y),
        )
    }
}

fn validate_resolution(axis: Axis, value: f64) -> Result<(), ConfigError> {
    // NaN fails this comparison too
    if value > 0. && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveResolution { axis, value })
    }
}

/// The time samples at which a function is evaluated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeRange {
    /// First time sample.
    pub from: f64,
    /// Upper bound of the time samples (included if the step divides the range).
    pub to: f64,
    /// Spacing between time samples.
    pub resolution: f64,
}

impl TimeRange {
    /// A range containing only the single time `t`.
    #[inline]
    pub const fn instant(t: f64) -> Self {
        Self {
            from: t,
            to: t,
            resolution: 1.,
        }
    }

    /// Check that the range is ordered, the resolution positive
    /// and there are at most [`MAX_GRID_POINTS`] samples.
    pub fn validate(&self) -> Result<(), ConfigError> {
        crate::error::ensure_finite("time range start", self.from)?;
        crate::error::ensure_finite("time range end", self.to)?;
        validate_resolution(Axis::Time, self.resolution)?;
        if self.from > self.to {
            return Err(ConfigError::EmptyInterval {
                axis: Axis::Time,
                min: self.from,
                max: self.to,
            });
        }
        validate_grid_len(Axis::Time, self.from, self.to, self.resolution)
    }

    /// Number of time samples. `from == to` gives exactly one.
    #[inline]
    pub fn sample_count(&self) -> usize {
        grid_len(self.from, self.to, self.resolution)
    }

    /// Iterate over the time samples.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.sample_count()).map(move |i| self.from + i as f64 * self.resolution)
    }
}

/// Values of a function sampled on a grid at one or more times,
/// indexed as `[time][x][y]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
    times: Vec<f64>,
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// one matrix per time sample,
    /// rows corresponding to x indices and columns to y indices
    slices: Vec<na::DMatrix<f64>>,
}

/// One time sample of a [`ScalarField`] together with its grid coordinates.
#[derive(Clone, Copy, Debug)]
pub struct FieldSlice<'a> {
    /// The time this slice was sampled at.
    pub time: f64,
    /// Grid coordinates along the x axis.
    pub xs: &'a [f64],
    /// Grid coordinates along the y axis.
    pub ys: &'a [f64],
    /// Sampled values, `values[(i, j)]` being the value at `(xs[i], ys[j])`.
    pub values: &'a na::DMatrix<f64>,
}

impl ScalarField {
    /// The times the field was sampled at.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Grid coordinates along the x axis.
    #[inline]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Grid coordinates along the y axis.
    #[inline]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Number of grid points along the x and y axes.
    #[inline]
    pub fn grid_shape(&self) -> (usize, usize) {
        (self.xs.len(), self.ys.len())
    }

    /// Get the value at time index `t`, x index `i` and y index `j`.
    pub fn get(&self, t: usize, i: usize, j: usize) -> Option<f64> {
        self.slices.get(t)?.get((i, j)).copied()
    }

    /// Get the slice at the given time index.
    pub fn slice(&self, t: usize) -> Option<FieldSlice<'_>> {
        Some(FieldSlice {
            time: *self.times.get(t)?,
            xs: &self.xs,
            ys: &self.ys,
            values: self.slices.get(t)?,
        })
    }

    /// Iterate over all time slices in order.
    pub fn slices(&self) -> impl Iterator<Item = FieldSlice<'_>> + '_ {
        (0..self.times.len()).filter_map(|t| self.slice(t))
    }
}

/// Evaluate `f(t, x, y)` at every vertex of the domain's grid
/// for every time sample.
///
/// Evaluation order is time first, then x, then y.
/// The function is assumed to be pure; no caching is done here.
/// Fails if the total number of evaluations would exceed [`MAX_FIELD_SAMPLES`].
///
/// ```
/// # use surfplot_core::{domain::{sample, Domain, TimeRange}};
/// let field = sample(&Domain::default(), &TimeRange::instant(0.), |_t, x, y| x * y)?;
/// assert_eq!(field.grid_shape(), (21, 21));
/// assert_eq!(field.get(0, 0, 20), Some(-100.));
/// # Ok::<(), surfplot_core::PlotError>(())
/// ```
pub fn sample<F>(domain: &Domain, times: &TimeRange, f: F) -> Result<ScalarField, PlotError>
where
    F: Fn(f64, f64, f64) -> f64,
{
    domain.validate()?;
    times.validate()?;
    let (nx, ny) = domain.grid_shape();
    let samples = nx as u64 * ny as u64 * times.sample_count() as u64;
    if samples > MAX_FIELD_SAMPLES {
        return Err(ConfigError::FieldTooLarge { samples }.into());
    }

    let xs = domain.x.grid_points(domain.resolution.x).collect_vec();
    let ys = domain.y.grid_points(domain.resolution.y).collect_vec();
    let times = times.iter().collect_vec();

    let slices = times
        .iter()
        .map(|&t| {
            // values are generated x-row by x-row,
            // keeping y as the innermost evaluation loop
            let row_major = iproduct!(&xs, &ys).map(|(&x, &y)| f(t, x, y)).collect_vec();
            na::DMatrix::from_row_slice(xs.len(), ys.len(), &row_major)
        })
        .collect();

    Ok(ScalarField {
        times,
        xs,
        ys,
        slices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn grid_cardinality() {
        let domain = Domain::default();
        assert_eq!(domain.grid_shape(), (21, 21));

        // truncation, not rounding: 0, 0.75, 1.5 and no point at 2
        let interval = Interval::new(0., 2.);
        assert_eq!(interval.grid_len(0.75), 3);
        assert_eq!(interval.grid_points(0.75).collect_vec(), vec![0., 0.75, 1.5]);

        // representation error in the division doesn't lose the last point
        let interval = Interval::new(-1., 1.);
        assert_eq!(interval.grid_len(0.1), 21);
        // 0.3 / 0.1 rounds below 3, and 3 * 0.1 rounds above 0.3
        let interval = Interval::new(0., 0.3);
        assert_eq!(interval.grid_len(0.1), 4);
    }

    /// A remainder just short of a whole step is still truncated,
    /// so no grid point ever lands past `max`.
    #[test]
    fn grid_never_overshoots_max() {
        let interval = Interval::new(0., 2.999999999999);
        assert_eq!(interval.grid_len(1.), 3);
        assert_eq!(interval.grid_points(1.).collect_vec(), vec![0., 1., 2.]);

        // the allowed rounding error doesn't grow with the point count
        assert_eq!(Interval::new(0., 1e9).grid_len(1.), 1_000_000_001);
        assert_eq!(Interval::new(0., 1e9 - 0.5).grid_len(1.), 1_000_000_000);

        for (min, max, step) in [(-3., 7.9, 0.7), (0., 1e6, 3.), (-0.5, 0.5, 0.01)] {
            let interval = Interval::new(min, max);
            let last = interval.grid_points(step).last().unwrap();
            assert!(last <= max, "[{min}, {max}] step {step}: last point {last}");
            assert!(last + step > max, "[{min}, {max}] step {step}: lost a point");
        }
    }

    /// Grids too large to sample are rejected up front
    /// instead of overflowing or exhausting memory later.
    #[test]
    fn oversized_grids_are_rejected() {
        let huge = Domain {
            x: Interval::new(-1e308, 1e308),
            ..Default::default()
        };
        assert!(matches!(
            huge.validate(),
            Err(ConfigError::GridTooLarge { axis: Axis::X, .. })
        ));
        // counting doesn't panic even without validation
        assert_eq!(huge.x.grid_len(1.), usize::MAX);

        let fine = Domain {
            resolution: Resolution { x: 1., y: 1e-9 },
            ..Default::default()
        };
        assert!(matches!(
            fine.validate(),
            Err(ConfigError::GridTooLarge { axis: Axis::Y, .. })
        ));

        let largest = Domain {
            x: Interval::new(0., (MAX_GRID_POINTS - 1) as f64),
            y: Interval::new(0., 1.),
            resolution: Resolution::uniform(1.),
        };
        assert_eq!(largest.validate(), Ok(()));
        let too_many = Domain {
            x: Interval::new(0., MAX_GRID_POINTS as f64),
            ..largest
        };
        assert!(too_many.validate().is_err());

        let long = TimeRange {
            from: 0.,
            to: 1e6,
            resolution: 1e-3,
        };
        assert!(matches!(
            long.validate(),
            Err(ConfigError::GridTooLarge { axis: Axis::Time, .. })
        ));
    }

    #[test]
    fn total_sample_count_is_limited() {
        let domain = Domain {
            x: Interval::new(0., 2047.),
            y: Interval::new(0., 2047.),
            resolution: Resolution::uniform(1.),
        };
        assert_eq!(domain.validate(), Ok(()));
        let times = TimeRange {
            from: 0.,
            to: 4.,
            resolution: 1.,
        };
        let result = sample(&domain, &times, |_, _, _| 0.);
        assert_eq!(
            result,
            Err(PlotError::InvalidConfig(ConfigError::FieldTooLarge {
                samples: 2048 * 2048 * 5
            }))
        );
    }

    #[test]
    fn sampled_values_match_function() {
        let domain = Domain {
            x: Interval::new(-1., 1.),
            y: Interval::new(0., 2.),
            resolution: Resolution { x: 1., y: 0.5 },
        };
        let times = TimeRange {
            from: 0.,
            to: 1.,
            resolution: 0.5,
        };
        let field = sample(&domain, &times, |t, x, y| t + 10. * x + 100. * y).unwrap();

        assert_eq!(field.times(), &[0., 0.5, 1.]);
        assert_eq!(field.xs(), &[-1., 0., 1.]);
        assert_eq!(field.ys(), &[0., 0.5, 1., 1.5, 2.]);
        assert_eq!(field.grid_shape(), (3, 5));
        for (t_idx, &t) in field.times().iter().enumerate() {
            for (i, &x) in field.xs().iter().enumerate() {
                for (j, &y) in field.ys().iter().enumerate() {
                    assert_eq!(field.get(t_idx, i, j), Some(t + 10. * x + 100. * y));
                }
            }
        }
        assert_eq!(field.get(3, 0, 0), None);
        assert_eq!(field.get(0, 3, 0), None);
        assert_eq!(field.slices().count(), 3);
    }

    #[test]
    fn evaluation_order_is_time_x_y() {
        let domain = Domain {
            x: Interval::new(0., 1.),
            y: Interval::new(0., 1.),
            resolution: Resolution::uniform(1.),
        };
        let times = TimeRange {
            from: 0.,
            to: 1.,
            resolution: 1.,
        };
        let calls = RefCell::new(Vec::new());
        sample(&domain, &times, |t, x, y| {
            calls.borrow_mut().push((t, x, y));
            0.
        })
        .unwrap();

        #[rustfmt::skip]
        let expected = vec![
            (0., 0., 0.), (0., 0., 1.), (0., 1., 0.), (0., 1., 1.),
            (1., 0., 0.), (1., 0., 1.), (1., 1., 0.), (1., 1., 1.),
        ];
        assert_eq!(calls.into_inner(), expected);
    }

    #[test]
    fn single_time_sample() {
        let times = TimeRange::instant(3.5);
        assert_eq!(times.sample_count(), 1);
        let field = sample(&Domain::default(), &times, |t, _, _| t).unwrap();
        assert_eq!(field.times(), &[3.5]);
        assert!(field.slice(0).unwrap().values.iter().all(|&v| v == 3.5));
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let zero_fn = |_: f64, _: f64, _: f64| 0.;
        let now = TimeRange::instant(0.);

        let mut domain = Domain::default();
        domain.resolution.y = 0.;
        assert_eq!(
            sample(&domain, &now, zero_fn),
            Err(PlotError::InvalidConfig(
                ConfigError::NonPositiveResolution {
                    axis: Axis::Y,
                    value: 0.
                }
            ))
        );

        let mut domain = Domain::default();
        domain.x = Interval::new(1., 1.);
        assert_eq!(
            sample(&domain, &now, zero_fn),
            Err(PlotError::InvalidConfig(ConfigError::EmptyInterval {
                axis: Axis::X,
                min: 1.,
                max: 1.
            }))
        );

        let times = TimeRange {
            from: 0.,
            to: 0.,
            resolution: -1.,
        };
        assert!(matches!(
            sample(&Domain::default(), &times, zero_fn),
            Err(PlotError::InvalidConfig(
                ConfigError::NonPositiveResolution {
                    axis: Axis::Time,
                    ..
                }
            ))
        ));

        let times = TimeRange {
            from: 1.,
            to: 0.,
            resolution: 1.,
        };
        assert!(matches!(
            sample(&Domain::default(), &times, zero_fn),
            Err(PlotError::InvalidConfig(ConfigError::EmptyInterval {
                axis: Axis::Time,
                ..
            }))
        ));
    }
}
