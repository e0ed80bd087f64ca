//! Orientation of the viewer and the rotation matrices derived from it.
//!
//! # Axis convention
//!
//! In model space, `x` points right and `y` points up the screen
//! when the orientation is zero, and `z` is the function value,
//! pointing out of the screen toward the viewer.
//! Zero yaw and pitch therefore looks straight down on the surface.
//!
//! Yaw spins the surface about its own height axis (model `z`),
//! right-handed, so a positive yaw turns `+x` toward `+y`.
//! Pitch then tilts the result about the screen's horizontal axis (`x`).
//! A positive pitch tips the far (`+y`) edge of the surface away from the viewer
//! and raises the height axis up the screen,
//! so with `pitch = π/2` the surface is seen edge-on from the front.

use nalgebra as na;

/// A 3x3 orthonormal matrix mapping model space to view space.
pub type RotationMatrix = na::Rotation3<f64>;

/// Build the rotation that first applies `yaw` about the vertical axis
/// and then `pitch` about the horizontal axis, i.e. `R_pitch * R_yaw`.
///
/// The pitch is used as given; clamping it is the job of
/// [`Orientation::oriented`].
/// Zero yaw and pitch give the identity exactly.
pub fn rotation_matrix(yaw: f64, pitch: f64) -> RotationMatrix {
    let (sin_y, cos_y) = yaw.sin_cos();
    let (sin_p, cos_p) = pitch.sin_cos();

    #[rustfmt::skip]
    let yaw_rot = na::Matrix3::new(
        cos_y, -sin_y, 0.,
        sin_y,  cos_y, 0.,
        0.,     0.,    1.,
    );
    // rotation about the negative x axis,
    // so that positive pitch looks down on the surface from the front
    #[rustfmt::skip]
    let pitch_rot = na::Matrix3::new(
        1.,  0.,    0.,
        0.,  cos_p, sin_p,
        0., -sin_p, cos_p,
    );

    // order matters here, rotations don't commute
    na::Rotation3::from_matrix_unchecked(pitch_rot * yaw_rot)
}

/// Clamp a pitch angle to `[-max_pitch, max_pitch]`.
///
/// Doesn't panic on a NaN or negative `max_pitch` like [`f64::clamp`] would;
/// those are rejected when parameters are validated.
#[inline]
pub fn clamp_pitch(pitch: f64, max_pitch: f64) -> f64 {
    pitch.max(-max_pitch).min(max_pitch)
}

/// Viewing angles of a surface, in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orientation {
    /// Rotation about the vertical axis.
    pub yaw: f64,
    /// Tilt about the horizontal axis.
    pub pitch: f64,
}

/// A change of orientation. Angles left as `None` keep their current value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrientRequest {
    /// New yaw, if any.
    pub yaw: Option<f64>,
    /// New pitch, if any. Clamped to the surface's maximum pitch.
    pub pitch: Option<f64>,
}

impl OrientRequest {
    /// Request a new yaw only.
    pub fn yaw(yaw: f64) -> Self {
        Self {
            yaw: Some(yaw),
            pitch: None,
        }
    }

    /// Request a new pitch only.
    pub fn pitch(pitch: f64) -> Self {
        Self {
            yaw: None,
            pitch: Some(pitch),
        }
    }

    /// Request both angles.
    pub fn both(yaw: f64, pitch: f64) -> Self {
        Self {
            yaw: Some(yaw),
            pitch: Some(pitch),
        }
    }
}

impl Orientation {
    /// Compute the orientation resulting from applying a request to this one.
    ///
    /// The resulting pitch is always within `[-max_pitch, max_pitch]`.
    /// `self` is not modified.
    pub fn oriented(self, request: OrientRequest, max_pitch: f64) -> Self {
        Self {
            yaw: request.yaw.unwrap_or(self.yaw),
            pitch: clamp_pitch(request.pitch.unwrap_or(self.pitch), max_pitch),
        }
    }

    /// The rotation matrix corresponding to this orientation.
    #[inline]
    pub fn rotation(&self) -> RotationMatrix {
        rotation_matrix(self.yaw, self.pitch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{abs_diff_eq, relative_eq};
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn zero_angles_give_identity() {
        let rot = rotation_matrix(0., 0.);
        assert_eq!(rot, na::Rotation3::identity(), "got {rot}");
    }

    #[test]
    fn rotations_are_orthonormal() {
        let angles = [-PI, -2., -FRAC_PI_2, -0.3, 0., 0.5, 1., FRAC_PI_2, 2.5, PI];
        for &yaw in &angles {
            for &pitch in angles.iter().filter(|p| p.abs() <= FRAC_PI_2) {
                let m = rotation_matrix(yaw, pitch).into_inner();
                let mtm = m.transpose() * m;
                assert!(
                    abs_diff_eq!(mtm, na::Matrix3::identity(), epsilon = 1e-12),
                    "M^T M != I for yaw {yaw}, pitch {pitch}: {mtm}"
                );
                let det = m.determinant();
                assert!(
                    relative_eq!(det, 1., epsilon = 1e-12),
                    "det {det} for yaw {yaw}, pitch {pitch}"
                );
            }
        }
    }

    /// Yaw is applied before pitch, and each rotates about the documented axis.
    #[test]
    fn axis_convention_and_composition_order() {
        let eps = 1e-12;

        // yaw alone spins x toward y about the height axis
        let yawed = rotation_matrix(FRAC_PI_2, 0.) * na::Vector3::x();
        assert!(abs_diff_eq!(yawed, na::Vector3::y(), epsilon = eps), "{yawed}");

        // pitch alone tips the far edge (+y) away from the viewer (-z)
        let pitched = rotation_matrix(0., FRAC_PI_2) * na::Vector3::y();
        assert!(abs_diff_eq!(pitched, -na::Vector3::z(), epsilon = eps), "{pitched}");
        // and raises the height axis up the screen
        let height = rotation_matrix(0., FRAC_PI_2) * na::Vector3::z();
        assert!(abs_diff_eq!(height, na::Vector3::y(), epsilon = eps), "{height}");

        // combined: yaw takes x to y, then pitch takes y to -z
        let both = rotation_matrix(FRAC_PI_2, FRAC_PI_2) * na::Vector3::x();
        assert!(abs_diff_eq!(both, -na::Vector3::z(), epsilon = eps), "{both}");
        // the opposite order would have taken x to y instead
        let reversed = (rotation_matrix(FRAC_PI_2, 0.).into_inner()
            * rotation_matrix(0., FRAC_PI_2).into_inner())
            * na::Vector3::x();
        assert!(abs_diff_eq!(reversed, na::Vector3::y(), epsilon = eps));
        assert!(!abs_diff_eq!(both, reversed, epsilon = eps));
    }

    #[test]
    fn pitch_is_clamped() {
        let start = Orientation {
            yaw: 0.5,
            pitch: 0.5,
        };
        let o = start.oriented(OrientRequest::pitch(10.), FRAC_PI_2);
        assert_eq!(o.pitch, FRAC_PI_2);
        assert_eq!(o.yaw, 0.5);

        let o = start.oriented(OrientRequest::pitch(-10.), FRAC_PI_2);
        assert_eq!(o.pitch, -FRAC_PI_2);

        // in-range values and untouched angles pass through
        let o = start.oriented(OrientRequest::yaw(3.), FRAC_PI_2);
        assert_eq!(o, Orientation { yaw: 3., pitch: 0.5 });

        // the original value is unchanged
        assert_eq!(start.pitch, 0.5);
        // an existing out-of-range pitch gets clamped by an empty request
        let tilted = Orientation { yaw: 0., pitch: 1. };
        assert_eq!(tilted.oriented(OrientRequest::default(), 0.25).pitch, 0.25);
    }
}
