//! Orthographic projection of a sampled surface onto the screen.

use nalgebra as na;

use crate::{domain::FieldSlice, rotation::RotationMatrix};

/// A point in pixel space, `y` growing downward.
pub type ProjectedPoint = na::Point2<f64>;

/// Projected points in the same layout as the field slice they came from,
/// `grid[(i, j)]` being the image of the vertex at x index `i` and y index `j`.
pub type ProjectedGrid = na::DMatrix<ProjectedPoint>;

/// Scaling applied to each model axis before rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale {
    /// Scale of the x variable.
    pub x: f64,
    /// Scale of the y variable.
    pub y: f64,
    /// Scale of the function value.
    pub z: f64,
}

impl Scale {
    /// Create a scale with separate factors per axis.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The same factor on every axis.
    #[inline]
    pub const fn uniform(s: f64) -> Self {
        Self { x: s, y: s, z: s }
    }

    /// One shared factor for the input plane and another for the height.
    #[inline]
    pub const fn xy_z(xy: f64, z: f64) -> Self {
        Self { x: xy, y: xy, z }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::uniform(1.)
    }
}

/// A fixed orthographic mapping from model space to pixel space.
///
/// Every vertex of a render goes through the same rotation, scale and zoom,
/// so the projection never distorts the surface's shape relative to itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Model-to-screen linear part:
    /// axis scaling, then rotation, then dropping the depth axis,
    /// zooming and flipping y to point down.
    transform: na::Matrix2x3<f64>,
    /// Center of the viewport, where the model origin lands.
    center: ProjectedPoint,
}

impl Projection {
    /// Build a projection from its parameters.
    /// `viewport_size` is `(width, height)` in pixels.
    pub fn new(
        rotation: &RotationMatrix,
        scale: Scale,
        zoom: f64,
        viewport_size: (u32, u32),
    ) -> Self {
        // orthographic: the view-space z row is simply left out
        #[rustfmt::skip]
        let screen = na::Matrix2x3::new(
            zoom, 0.,    0.,
            0.,   -zoom, 0.,
        );
        let axis_scale = na::Matrix3::from_diagonal(&na::Vector3::new(scale.x, scale.y, scale.z));
        let transform = screen * rotation.matrix() * axis_scale;

        let center = ProjectedPoint::new(
            viewport_size.0 as f64 / 2.,
            viewport_size.1 as f64 / 2.,
        );

        Self { transform, center }
    }

    /// The screen position of model point `(x, y, z)`.
    ///
    /// Non-finite coordinates are passed through as they are.
    #[inline]
    pub fn project_point(&self, x: f64, y: f64, z: f64) -> ProjectedPoint {
        self.center + self.transform * na::Vector3::new(x, y, z)
    }

    /// Project every vertex of a field slice.
    pub fn project(&self, slice: &FieldSlice<'_>) -> ProjectedGrid {
        ProjectedGrid::from_fn(slice.xs.len(), slice.ys.len(), |i, j| {
            self.project_point(slice.xs[i], slice.ys[j], slice.values[(i, j)])
        })
    }
}
