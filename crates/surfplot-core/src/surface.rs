//! The configured surface and its render and orient operations.

use crate::{
    domain::{self, Domain, ScalarField, TimeRange},
    error::ensure_finite,
    params::SurfaceParams,
    projection::{Projection, Scale},
    quad::{self, VisData},
    rotation::{clamp_pitch, OrientRequest, Orientation, RotationMatrix},
    PlotError,
};

/// A function `f(t, x, y)` to plot.
pub type SurfaceFn = Box<dyn Fn(f64, f64, f64) -> f64>;

/// A plot of a function of two variables and time as a pseudo-3D surface.
///
/// Owns the configuration, current orientation and plotted function.
/// Rendering produces [`VisData`] that can be drawn with any renderer,
/// e.g. the raster and vector targets in `surfplot-visuals`.
///
/// ```
/// # use surfplot_core::{OrientRequest, Surface, SurfaceParams};
/// let mut surface = Surface::new(SurfaceParams::default())?
///     .with_function(|t, x, y| (x * x + y * y - t).sqrt().sin());
/// surface.orient(OrientRequest::yaw(1.2))?;
/// let frame = surface.render(0.)?;
/// assert_eq!(frame.quads.len() + frame.skipped, 20 * 20);
/// # Ok::<(), surfplot_core::PlotError>(())
/// ```
pub struct Surface {
    /// always valid, with pitch within max_pitch
    params: SurfaceParams,
    function: SurfaceFn,
    /// bumped whenever the function is replaced,
    /// standing in for the function's identity in the cache key
    function_generation: u64,
    rotation: RotationMatrix,
    field_cache: Option<CachedField>,
}

/// Everything sampling depends on.
/// A field sampled with an equal key can be reused as is.
#[derive(Clone, Copy, Debug, PartialEq)]
struct FieldKey {
    function_generation: u64,
    domain: Domain,
    times: TimeRange,
}

struct CachedField {
    key: FieldKey,
    field: ScalarField,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("params", &self.params)
            .field("function_generation", &self.function_generation)
            .field("rotation", &self.rotation)
            .finish_non_exhaustive()
    }
}

impl Surface {
    /// Create a surface plotting the constant zero function.
    ///
    /// Parameters are validated here, so a surface that was created successfully
    /// always has a usable configuration.
    pub fn new(params: SurfaceParams) -> Result<Self, PlotError> {
        params.validate()?;
        let params = Self::clamped(params);
        Ok(Self {
            params,
            function: Box::new(|_: f64, _: f64, _: f64| 0.),
            function_generation: 0,
            rotation: Self::orientation_of(&params).rotation(),
            field_cache: None,
        })
    }

    /// Replace the plotted function, builder style.
    pub fn with_function(mut self, f: impl Fn(f64, f64, f64) -> f64 + 'static) -> Self {
        self.set_function(f);
        self
    }

    /// Replace the plotted function.
    ///
    /// The function should be pure,
    /// as sampled values are reused between renders at the same time.
    pub fn set_function(&mut self, f: impl Fn(f64, f64, f64) -> f64 + 'static) {
        self.function = Box::new(f);
        self.function_generation += 1;
        self.field_cache = None;
    }

    /// The current configuration.
    ///
    /// Its `yaw` and `pitch` reflect the current orientation.
    #[inline]
    pub fn params(&self) -> &SurfaceParams {
        &self.params
    }

    /// The current viewing angles.
    #[inline]
    pub fn orientation(&self) -> Orientation {
        Self::orientation_of(&self.params)
    }

    /// The rotation matrix of the current orientation.
    #[inline]
    pub fn rotation(&self) -> &RotationMatrix {
        &self.rotation
    }

    /// The projection that renders currently go through.
    pub fn projection(&self) -> Projection {
        Projection::new(
            &self.rotation,
            self.params.scale,
            self.params.zoom,
            self.params.viewport_size(),
        )
    }

    /// Replace the whole configuration.
    ///
    /// On error the surface is left unchanged.
    pub fn reconfigure(&mut self, params: SurfaceParams) -> Result<&mut Self, PlotError> {
        params.validate()?;
        self.params = Self::clamped(params);
        self.rotation = self.orientation().rotation();
        log::debug!("Surface reconfigured: {:?}", self.params);
        Ok(self)
    }

    /// Change the viewport size in pixels.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<&mut Self, PlotError> {
        self.reconfigure(SurfaceParams {
            width,
            height,
            ..self.params
        })
    }

    /// Change the screen-space zoom.
    pub fn set_zoom(&mut self, zoom: f64) -> Result<&mut Self, PlotError> {
        self.reconfigure(SurfaceParams { zoom, ..self.params })
    }

    /// Change the per-axis scaling.
    pub fn set_scale(&mut self, scale: Scale) -> Result<&mut Self, PlotError> {
        self.reconfigure(SurfaceParams {
            scale,
            ..self.params
        })
    }

    /// Change the sampled region or resolution.
    pub fn set_domain(&mut self, domain: Domain) -> Result<&mut Self, PlotError> {
        self.reconfigure(SurfaceParams {
            domain,
            ..self.params
        })
    }

    /// Change the viewing angles.
    ///
    /// Angles missing from the request are kept as they are,
    /// and the pitch is clamped to `[-max_pitch, max_pitch]`.
    /// Returns the resulting orientation.
    pub fn orient(&mut self, request: OrientRequest) -> Result<Orientation, PlotError> {
        if let Some(yaw) = request.yaw {
            ensure_finite("yaw", yaw)?;
        }
        if let Some(pitch) = request.pitch {
            ensure_finite("pitch", pitch)?;
        }

        let orientation = self
            .orientation()
            .oriented(request, self.params.max_pitch);
        self.params.yaw = orientation.yaw;
        self.params.pitch = orientation.pitch;
        self.rotation = orientation.rotation();
        Ok(orientation)
    }

    /// Sample the function at `time` and build the quads to paint.
    pub fn render(&mut self, time: f64) -> Result<VisData, PlotError> {
        let frames = self.render_frames(TimeRange::instant(time))?;
        // an instant always has exactly one sample
        Ok(frames.into_iter().next().unwrap_or(VisData {
            time,
            quads: Vec::new(),
            skipped: 0,
        }))
    }

    /// Render one frame per time sample in the range,
    /// e.g. to produce an animation.
    pub fn render_frames(&mut self, times: TimeRange) -> Result<Vec<VisData>, PlotError> {
        let projection = self.projection();
        let field = self.sampled_field(times)?;

        let frames = field
            .slices()
            .map(|slice| {
                let points = projection.project(&slice);
                let vis = quad::assemble(&points, slice.values, slice.time);
                if vis.skipped > 0 {
                    log::warn!(
                        "Skipped {} cells with non-finite values at t = {}",
                        vis.skipped,
                        vis.time
                    );
                }
                log::debug!("Rendered {} quads at t = {}", vis.quads.len(), vis.time);
                vis
            })
            .collect();
        Ok(frames)
    }

    /// Get the field for the given times, reusing the last one if nothing changed.
    fn sampled_field(&mut self, times: TimeRange) -> Result<&ScalarField, PlotError> {
        let key = FieldKey {
            function_generation: self.function_generation,
            domain: self.params.domain,
            times,
        };
        let cached = match self.field_cache.take() {
            Some(cached) if cached.key == key => {
                log::trace!("Field cache hit for {times:?}");
                cached
            }
            _ => {
                log::trace!("Sampling field for {times:?}");
                let field = domain::sample(&self.params.domain, &times, &self.function)?;
                CachedField { key, field }
            }
        };
        Ok(&self.field_cache.insert(cached).field)
    }

    fn clamped(params: SurfaceParams) -> SurfaceParams {
        SurfaceParams {
            pitch: clamp_pitch(params.pitch, params.max_pitch),
            ..params
        }
    }

    fn orientation_of(params: &SurfaceParams) -> Orientation {
        Orientation {
            yaw: params.yaw,
            pitch: params.pitch,
        }
    }
}
