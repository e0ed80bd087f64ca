//! This is the core crate containing the geometry pipeline of `surfplot`
//! (everything except drawing to an actual image).
//! See the `surfplot` crate's documentation for an introduction.
//!
//! The pipeline turns a function `f(t, x, y)` into paintable 2D shapes in four steps:
//! 1. [`sample`][domain::sample] the function on a grid over a [`Domain`],
//! 2. build a [`RotationMatrix`] from the viewing angles,
//! 3. [`project`][Projection::project] the sampled points orthographically onto the screen,
//! 4. [`assemble`][quad::assemble] one [`Quad`] per grid cell.
//!
//! [`Surface`] holds the configuration and runs all of these on each render.

#![warn(missing_docs)]

pub mod domain;
#[doc(inline)]
pub use domain::{Domain, Interval, Resolution, ScalarField, TimeRange};

pub mod error;
#[doc(inline)]
pub use error::{ConfigError, PlotError};

pub mod params;
#[doc(inline)]
pub use params::SurfaceParams;

pub mod projection;
#[doc(inline)]
pub use projection::{ProjectedPoint, Projection, Scale};

pub mod quad;
#[doc(inline)]
pub use quad::{Quad, VisData};

pub mod rotation;
#[doc(inline)]
pub use rotation::{rotation_matrix, OrientRequest, Orientation, RotationMatrix};

mod surface;
#[doc(inline)]
pub use surface::{Surface, SurfaceFn};

// nalgebra re-export for convenience
pub use nalgebra as na;
