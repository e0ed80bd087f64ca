//! Drawing quads into a bitmap.

use image::{Pixel, Rgba, RgbaImage};
use kurbo::{ParamCurveNearest, Point, Rect, Shape};
use std::{ops::Range, path::Path};
use surfplot_core::Quad;

use super::{quad_edges, quad_path, DrawTarget, TargetError};
use crate::color_map::Color;

/// Outlines are drawn through every pixel whose center
/// is at most this far from an edge.
const STROKE_HALF_WIDTH: f64 = 0.5;
/// Accuracy passed to kurbo's nearest point search.
/// Exact for lines anyway.
const NEAREST_ACCURACY: f64 = 1e-6;

/// A bitmap target.
///
/// Fills are computed by sampling pixel centers against the quad
/// (nonzero winding), without antialiasing.
/// Colors are blended over what's already drawn.
#[derive(Clone, Debug)]
pub struct RasterTarget {
    image: RgbaImage,
}

impl RasterTarget {
    /// Create a transparent bitmap of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// The image drawn so far.
    #[inline]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Take the image out of the target.
    #[inline]
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Write the image as a PNG file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TargetError> {
        self.image.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    /// Blend `color` over every pixel in `area` whose center passes `covered`.
    fn blend_where(&mut self, area: Rect, color: Color, covered: impl Fn(Point) -> bool) {
        let color = Rgba(color);
        for y in pixel_span(area.y0, area.y1, self.image.height()) {
            for x in pixel_span(area.x0, area.x1, self.image.width()) {
                let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                if covered(center) {
                    self.image.get_pixel_mut(x, y).blend(&color);
                }
            }
        }
    }
}

/// Indices of the pixels overlapping `[min, max]` along one axis,
/// clipped to the image.
fn pixel_span(min: f64, max: f64, limit: u32) -> Range<u32> {
    let start = min.floor().clamp(0., limit as f64) as u32;
    let end = max.ceil().clamp(0., limit as f64) as u32;
    start..end
}

impl DrawTarget for RasterTarget {
    fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba([0; 4]);
        }
    }

    fn paint(&mut self, quad: &Quad, fill: Color, stroke: Color) {
        if fill[3] > 0 {
            let path = quad_path(quad);
            self.blend_where(path.bounding_box(), fill, |p| path.winding(p) != 0);
        }

        if stroke[3] > 0 {
            let edges = quad_edges(quad);
            let area = quad_path(quad)
                .bounding_box()
                .inflate(STROKE_HALF_WIDTH, STROKE_HALF_WIDTH);
            let max_dist_sq = STROKE_HALF_WIDTH * STROKE_HALF_WIDTH;
            self.blend_where(area, stroke, |p| {
                edges
                    .iter()
                    .any(|e| e.nearest(p, NEAREST_ACCURACY).distance_sq <= max_dist_sq)
            });
        }
    }
}
