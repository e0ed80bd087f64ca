//! Painting rendered surfaces onto a [`DrawTarget`].

use std::ops::Range;
use surfplot_core::VisData;

use crate::{
    color_map::{Color, ColorMap},
    target::DrawTarget,
};

/// A function choosing a color for a quad from its average height.
pub type ColorFn = Box<dyn Fn(f64) -> Color>;

/// Colors used when painting a surface.
pub struct PaintParams {
    /// Fill color of each quad. Default: constant gray `[128, 128, 128, 255]`.
    pub fill: ColorFn,
    /// Outline color of each quad. Default: translucent black `[0, 0, 0, 64]`.
    pub stroke: ColorFn,
}

impl Default for PaintParams {
    fn default() -> Self {
        Self {
            fill: Box::new(|_| [128, 128, 128, 255]),
            stroke: Box::new(|_| [0, 0, 0, 64]),
        }
    }
}

impl std::fmt::Debug for PaintParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaintParams").finish_non_exhaustive()
    }
}

impl PaintParams {
    /// Fill quads by looking up their average height in a color map,
    /// with `range` mapped onto the whole map.
    /// The stroke is left at its default.
    ///
    /// See [`avg_range`] for a range covering a whole rendered frame.
    pub fn color_mapped(map: ColorMap, range: Range<f64>) -> Self {
        Self {
            fill: Box::new(move |avg| map.sample(avg, &range)),
            ..Default::default()
        }
    }

    /// Replace the outline color function.
    pub fn with_stroke(mut self, stroke: impl Fn(f64) -> Color + 'static) -> Self {
        self.stroke = Box::new(stroke);
        self
    }
}

/// The range of average heights over the quads of a frame,
/// or `None` if there are no quads.
pub fn avg_range(vis: &VisData) -> Option<Range<f64>> {
    vis.quads.iter().map(|q| q.avg).fold(None, |range, avg| {
        Some(match range {
            None => avg..avg,
            Some(r) => r.start.min(avg)..r.end.max(avg),
        })
    })
}

/// Clear the target and paint every quad of `vis` onto it,
/// in the order they were assembled.
pub fn paint_surface<T: DrawTarget + ?Sized>(target: &mut T, vis: &VisData, paint: &PaintParams) {
    target.clear();
    for quad in &vis.quads {
        target.paint(quad, (paint.fill)(quad.avg), (paint.stroke)(quad.avg));
    }
    log::debug!("Painted {} quads at t = {}", vis.quads.len(), vis.time);
}
