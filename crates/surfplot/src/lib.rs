//! Pseudo-3D surface plots of scalar functions `f(t, x, y)`.
//!
//! A [`Surface`] samples its function on a grid over a rectangular [`Domain`],
//! rotates the sampled points by a yaw and a pitch angle,
//! projects them orthographically onto a 2D viewport
//! and groups them into one [`Quad`] per grid cell.
//! The quads come out in row-major order,
//! ready to be painted back to front with the painter's algorithm.
//!
//! ```
//! use surfplot as sp;
//!
//! let mut surface = sp::Surface::new(sp::SurfaceParams {
//!     domain: sp::Domain {
//!         x: sp::Interval::new(-2., 2.),
//!         y: sp::Interval::new(-2., 2.),
//!         resolution: sp::Resolution::uniform(0.5),
//!     },
//!     zoom: 40.,
//!     ..Default::default()
//! })?
//! .with_function(|t, x, y| (x * x + y * y - t).sin());
//!
//! let frame = surface.render(0.)?;
//! assert_eq!(frame.quads.len(), 8 * 8);
//!
//! // look at it from straight above
//! surface.orient(sp::OrientRequest::both(0., 0.))?;
//! # Ok::<(), sp::PlotError>(())
//! ```
//!
//! Drawing the quads into PNG or SVG images is done by the `visuals` module,
//! which is enabled with the `visuals` feature.
//! See the examples in the repository for usage.

#[doc(inline)]
pub use surfplot_core::*;

#[cfg(feature = "visuals")]
pub use surfplot_visuals as visuals;
