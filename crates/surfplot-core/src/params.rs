//! Configuration of a [`Surface`][crate::Surface].

use crate::{
    domain::Domain,
    error::{ensure_finite, ensure_positive, ConfigError},
    projection::Scale,
};

/// Parameters controlling how a surface is sampled and viewed.
///
/// The plotted function itself is given separately with
/// [`Surface::with_function`][crate::Surface::with_function],
/// since it isn't `Copy` or comparable like the rest of these.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceParams {
    /// The region of input space to sample, and the sampling resolution.
    /// Default: `[-10, 10]` on both axes with a resolution of 1.
    pub domain: Domain,
    /// Uniform scaling in screen space. Default: 1.
    pub zoom: f64,
    /// Initial rotation about the vertical axis, in radians. Default: 0.5.
    pub yaw: f64,
    /// Initial tilt about the horizontal axis, in radians. Default: 0.5.
    ///
    /// Clamped to `max_pitch` like any later change of orientation.
    pub pitch: f64,
    /// Largest allowed absolute pitch. Default: π/2.
    pub max_pitch: f64,
    /// Width of the viewport in pixels. Default: 300.
    pub width: u32,
    /// Height of the viewport in pixels. Default: 300.
    pub height: u32,
    /// Per-axis scaling applied before projection. Default: 1 on every axis.
    pub scale: Scale,
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            domain: Domain::default(),
            zoom: 1.,
            yaw: 0.5,
            pitch: 0.5,
            max_pitch: std::f64::consts::FRAC_PI_2,
            width: 300,
            height: 300,
            scale: Scale::default(),
        }
    }
}

impl SurfaceParams {
    /// Check every parameter, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.domain.validate()?;
        ensure_positive("zoom", self.zoom)?;
        ensure_finite("yaw", self.yaw)?;
        ensure_finite("pitch", self.pitch)?;
        ensure_finite("max_pitch", self.max_pitch)?;
        if self.max_pitch < 0. {
            return Err(ConfigError::NonPositive {
                name: "max_pitch",
                value: self.max_pitch,
            });
        }
        ensure_positive("width", self.width as f64)?;
        ensure_positive("height", self.height as f64)?;
        ensure_finite("x scale", self.scale.x)?;
        ensure_finite("y scale", self.scale.y)?;
        ensure_finite("z scale", self.scale.z)?;
        Ok(())
    }

    /// Viewport size as `(width, height)`.
    #[inline]
    pub fn viewport_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Axis, Interval, Resolution};

    #[test]
    fn defaults_are_valid() {
        let params = SurfaceParams::default();
        assert_eq!(params.validate(), Ok(()));
        assert_eq!(params.domain.x, Interval::new(-10., 10.));
        assert_eq!(params.domain.resolution, Resolution::uniform(1.));
        assert_eq!(params.viewport_size(), (300, 300));
        assert_eq!(params.scale, Scale::uniform(1.));
    }

    #[test]
    fn bad_values_are_reported() {
        let cases: Vec<(SurfaceParams, ConfigError)> = vec![
            (
                SurfaceParams {
                    zoom: 0.,
                    ..Default::default()
                },
                ConfigError::NonPositive {
                    name: "zoom",
                    value: 0.,
                },
            ),
            (
                SurfaceParams {
                    max_pitch: -1.,
                    ..Default::default()
                },
                ConfigError::NonPositive {
                    name: "max_pitch",
                    value: -1.,
                },
            ),
            (
                SurfaceParams {
                    height: 0,
                    ..Default::default()
                },
                ConfigError::NonPositive {
                    name: "height",
                    value: 0.,
                },
            ),
            (
                SurfaceParams {
                    scale: Scale::new(1., f64::INFINITY, 1.),
                    ..Default::default()
                },
                ConfigError::NonFinite {
                    name: "y scale",
                    value: f64::INFINITY,
                },
            ),
            (
                SurfaceParams {
                    domain: Domain {
                        resolution: Resolution { x: -0.5, y: 1. },
                        ..Default::default()
                    },
                    ..Default::default()
                },
                ConfigError::NonPositiveResolution {
                    axis: Axis::X,
                    value: -0.5,
                },
            ),
        ];
        for (params, expected) in cases {
            assert_eq!(params.validate(), Err(expected));
        }
    }
}
