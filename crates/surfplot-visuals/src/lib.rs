//! Drawing surfaces computed with `surfplot` into images.
//!
//! To draw a surface,
//! first render a frame with [`Surface::render`][surfplot_core::Surface::render],
//! create a [`Target`] of the desired kind and the surface's viewport size,
//! then call [`paint_surface`] with some [`PaintParams`]
//! and [`save`][Target::save] the result.
//! Raster targets are saved as PNG and vector targets as SVG.

#![warn(missing_docs)]

mod color_map;
#[doc(inline)]
pub use color_map::{builtin_color_maps, Color, ColorMap};

mod paint;
#[doc(inline)]
pub use paint::{avg_range, paint_surface, ColorFn, PaintParams};

mod target;
#[doc(inline)]
pub use target::{DrawTarget, RasterTarget, Target, TargetError, TargetKind, VectorTarget};

pub use palette;
