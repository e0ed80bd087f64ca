//! Tessellating a projected grid into paintable quads.

use itertools::iproduct;
use nalgebra as na;

use crate::projection::{ProjectedGrid, ProjectedPoint};

/// The face of one grid cell on screen.
///
/// The corners go around the cell in order
/// and the outline is implicitly closed back to `move_to`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    /// Corner at grid index `(i, j)`.
    pub move_to: ProjectedPoint,
    /// Corner at grid index `(i + 1, j)`.
    pub point_one: ProjectedPoint,
    /// Corner at grid index `(i + 1, j + 1)`.
    pub point_two: ProjectedPoint,
    /// Corner at grid index `(i, j + 1)`.
    pub point_three: ProjectedPoint,
    /// Mean of the function values at the four corners,
    /// used to pick the quad's colors.
    pub avg: f64,
}

impl Quad {
    /// The corners in drawing order.
    #[inline]
    pub fn corners(&self) -> [ProjectedPoint; 4] {
        [self.move_to, self.point_one, self.point_two, self.point_three]
    }

    /// Whether every corner coordinate is a finite number.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.corners()
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite())
    }
}

/// Everything needed to paint one time slice of a surface.
#[derive(Clone, Debug, PartialEq)]
pub struct VisData {
    /// The time the surface was sampled at.
    pub time: f64,
    /// Quads in row-major grid order.
    ///
    /// This is also the paint order. No depth sorting is done,
    /// so a quad may be painted over one that is actually in front of it.
    pub quads: Vec<Quad>,
    /// Number of cells left out because one of their corners
    /// projected to a non-finite position
    /// (the function returned NaN or an infinity there).
    pub skipped: usize,
}

/// Build one quad per grid cell, in row-major order.
///
/// An `nx` by `ny` grid gives `(nx - 1) * (ny - 1)` cells.
/// Cells with a non-finite corner are counted in [`VisData::skipped`]
/// instead of being emitted.
///
/// # Panics
///
/// If `points` and `values` have different shapes.
pub fn assemble(points: &ProjectedGrid, values: &na::DMatrix<f64>, time: f64) -> VisData {
    assert_eq!(
        points.shape(),
        values.shape(),
        "Projected grid and sampled values have different shapes"
    );
    let (nx, ny) = points.shape();
    let cells = iproduct!(0..nx.saturating_sub(1), 0..ny.saturating_sub(1));

    let mut quads = Vec::with_capacity(nx.saturating_sub(1) * ny.saturating_sub(1));
    let mut skipped = 0;
    for (i, j) in cells {
        let corners = [(i, j), (i + 1, j), (i + 1, j + 1), (i, j + 1)];
        let quad = Quad {
            move_to: points[corners[0]],
            point_one: points[corners[1]],
            point_two: points[corners[2]],
            point_three: points[corners[3]],
            avg: corners.iter().map(|&c| values[c]).sum::<f64>() / 4.,
        };
        if quad.is_finite() {
            quads.push(quad);
        } else {
            skipped += 1;
        }
    }

    VisData {
        time,
        quads,
        skipped,
    }
}
