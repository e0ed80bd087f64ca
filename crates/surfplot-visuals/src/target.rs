//! Surfaces that quads can be drawn onto.
//!
//! The kind of target is picked once when it's created;
//! after that all drawing goes through the [`DrawTarget`] trait.

mod raster;
pub use raster::RasterTarget;

mod vector;
pub use vector::VectorTarget;

//

use kurbo::{BezPath, Line, Point};
use std::path::Path;
use surfplot_core::Quad;

use crate::color_map::Color;

/// Error in creating or writing out a draw target.
#[derive(thiserror::Error, Debug)]
pub enum TargetError {
    /// The requested kind of target is neither raster nor vector.
    #[error("Unsupported target kind `{0}`, expected a raster or vector kind")]
    UnsupportedTargetKind(String),
    /// Encoding or writing a raster image failed.
    #[error("Writing the image failed")]
    Image(#[from] image::ImageError),
    /// Writing a file failed.
    #[error("Writing the file failed")]
    Io(#[from] std::io::Error),
}

/// Something quads can be painted onto.
///
/// Quads must be painted in the order they are given;
/// later quads cover earlier ones.
pub trait DrawTarget {
    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Fill a quad with one color and outline it with another.
    fn paint(&mut self, quad: &Quad, fill: Color, stroke: Color);
}

/// The kinds of target available.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// A bitmap image, see [`RasterTarget`].
    Raster,
    /// An SVG document, see [`VectorTarget`].
    Vector,
}

impl std::str::FromStr for TargetKind {
    type Err = TargetError;

    /// Parse a target kind from a name.
    ///
    /// `raster`, `canvas`, `bitmap` and `png` give [`TargetKind::Raster`],
    /// `vector` and `svg` give [`TargetKind::Vector`] (case insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raster" | "canvas" | "bitmap" | "png" => Ok(Self::Raster),
            "vector" | "svg" => Ok(Self::Vector),
            _ => Err(TargetError::UnsupportedTargetKind(s.to_string())),
        }
    }
}

/// A draw target of either kind.
#[derive(Clone, Debug)]
pub enum Target {
    /// Drawing into a bitmap.
    Raster(RasterTarget),
    /// Drawing into an SVG document.
    Vector(VectorTarget),
}

impl Target {
    /// Create an empty target of the given kind.
    /// `viewport_size` is `(width, height)` in pixels.
    pub fn new(kind: TargetKind, viewport_size: (u32, u32)) -> Self {
        log::debug!("Creating {kind:?} target of size {viewport_size:?}");
        let (width, height) = viewport_size;
        match kind {
            TargetKind::Raster => Self::Raster(RasterTarget::new(width, height)),
            TargetKind::Vector => Self::Vector(VectorTarget::new(width, height)),
        }
    }

    /// The kind of this target.
    pub fn kind(&self) -> TargetKind {
        match self {
            Self::Raster(_) => TargetKind::Raster,
            Self::Vector(_) => TargetKind::Vector,
        }
    }

    /// Write the target to a file, as a PNG or an SVG depending on its kind.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TargetError> {
        match self {
            Self::Raster(r) => r.save(path),
            Self::Vector(v) => v.save(path),
        }
    }
}

impl DrawTarget for Target {
    fn clear(&mut self) {
        match self {
            Self::Raster(r) => r.clear(),
            Self::Vector(v) => v.clear(),
        }
    }

    fn paint(&mut self, quad: &Quad, fill: Color, stroke: Color) {
        match self {
            Self::Raster(r) => r.paint(quad, fill, stroke),
            Self::Vector(v) => v.paint(quad, fill, stroke),
        }
    }
}

fn to_kurbo(p: &surfplot_core::ProjectedPoint) -> Point {
    Point::new(p.x, p.y)
}

/// The closed outline of a quad.
pub(crate) fn quad_path(quad: &Quad) -> BezPath {
    let [first, rest @ ..] = quad.corners();
    let mut path = BezPath::new();
    path.move_to(to_kurbo(&first));
    for corner in &rest {
        path.line_to(to_kurbo(corner));
    }
    path.close_path();
    path
}

/// The four edges of a quad, including the closing one.
pub(crate) fn quad_edges(quad: &Quad) -> [Line; 4] {
    let [a, b, c, d] = quad.corners().map(|p| to_kurbo(&p));
    [Line::new(a, b), Line::new(b, c), Line::new(c, d), Line::new(d, a)]
}
