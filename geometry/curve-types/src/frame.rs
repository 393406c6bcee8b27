//! Coordinate frames sampled along curves.
//!
//! A [`Frame`] is the "look rotation" of a point on a curve: the tangent is
//! the forward axis and a reference up vector (world up, rotated by the
//! curve's authored orientation) fixes the roll around it.

use nalgebra::{Matrix3, Point3, Rotation3, UnitQuaternion, Vector3};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::traits::{DEGENERATE_EPSILON, arbitrary_perpendicular};
use crate::{Curve, CurveError, Result};

/// Below this `|tangent × up|` the up reference is considered parallel.
const PARALLEL_EPSILON: f64 = 1e-6;

/// A coordinate frame at a point on a curve.
///
/// The three axes are mutually orthonormal and right-handed:
/// - `tangent`: Points along the curve in the direction of increasing `t`
/// - `up`: Perpendicular to tangent, as close to the reference up as possible
/// - `right`: `tangent × up`
///
/// In frame-local coordinates `+X` is the tangent, `+Y` is up and `+Z` is right.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    /// Position on the curve.
    pub position: Point3<f64>,
    /// Unit tangent vector (forward direction).
    pub tangent: Vector3<f64>,
    /// Unit up vector.
    pub up: Vector3<f64>,
    /// Unit right vector (`tangent × up`).
    pub right: Vector3<f64>,
    /// Parameter value `t` where this frame was computed.
    pub t: f64,
}

impl Frame {
    /// Build a frame looking along `tangent` with `up` as roll reference.
    ///
    /// # Errors
    ///
    /// - [`CurveError::DegenerateCurve`] if `tangent` has (near) zero length.
    ///   A bare tangent has no segment, so segment 0 is reported; [`frame_at`]
    ///   names the owning one.
    /// - [`CurveError::DegenerateFrame`] if `tangent` is parallel to `up`.
    pub fn try_look_along(
        position: Point3<f64>,
        tangent: Vector3<f64>,
        up: Vector3<f64>,
        t: f64,
    ) -> Result<Self> {
        let tangent = tangent
            .try_normalize(DEGENERATE_EPSILON)
            .ok_or_else(|| CurveError::degenerate(0, "tangent has zero length"))?;

        let right = tangent.cross(&up);
        let right_norm = right.norm();
        if right_norm < PARALLEL_EPSILON * up.norm().max(1.0) {
            return Err(CurveError::DegenerateFrame {
                tangent: [tangent.x, tangent.y, tangent.z],
                up: [up.x, up.y, up.z],
            });
        }

        let right = right / right_norm;
        let up = right.cross(&tangent);

        Ok(Self {
            position,
            tangent,
            up,
            right,
            t,
        })
    }

    /// Build a frame looking along `tangent`, recovering from a parallel up.
    ///
    /// When `up` is parallel to `tangent` an arbitrary perpendicular is used
    /// as the roll reference instead and the substitution is logged.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::DegenerateCurve`] if `tangent` has zero length.
    pub fn look_along(
        position: Point3<f64>,
        tangent: Vector3<f64>,
        up: Vector3<f64>,
        t: f64,
    ) -> Result<Self> {
        match Self::try_look_along(position, tangent, up, t) {
            Err(CurveError::DegenerateFrame { .. }) => {
                let tangent = tangent.normalize();
                let fallback = arbitrary_perpendicular(&tangent);
                debug!(
                    t,
                    tangent = ?tangent,
                    "tangent parallel to reference up, substituting perpendicular"
                );
                Self::try_look_along(position, tangent, fallback, t)
            }
            other => other,
        }
    }

    /// Rotation taking frame-local axes (`X` tangent, `Y` up, `Z` right)
    /// to world axes.
    #[must_use]
    pub fn to_rotation(&self) -> UnitQuaternion<f64> {
        let m = Matrix3::from_columns(&[self.tangent, self.up, self.right]);
        UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(m))
    }

    /// Transform a local point to world coordinates.
    #[must_use]
    pub fn local_to_world(&self, local: Point3<f64>) -> Point3<f64> {
        self.position + self.tangent * local.x + self.up * local.y + self.right * local.z
    }

    /// Transform a world point to local coordinates.
    #[must_use]
    pub fn world_to_local(&self, world: Point3<f64>) -> Point3<f64> {
        let v = world - self.position;
        Point3::new(v.dot(&self.tangent), v.dot(&self.up), v.dot(&self.right))
    }

    /// Offset the frame along its own tangent.
    #[must_use]
    pub fn pushed(&self, distance: f64) -> Self {
        Self {
            position: self.position + self.tangent * distance,
            ..*self
        }
    }

    /// Check if the frame is orthonormal within tolerance.
    #[must_use]
    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        let t_len = (self.tangent.norm() - 1.0).abs();
        let u_len = (self.up.norm() - 1.0).abs();
        let r_len = (self.right.norm() - 1.0).abs();
        let tu_dot = self.tangent.dot(&self.up).abs();
        let tr_dot = self.tangent.dot(&self.right).abs();
        let ur_dot = self.up.dot(&self.right).abs();

        t_len < tolerance
            && u_len < tolerance
            && r_len < tolerance
            && tu_dot < tolerance
            && tr_dot < tolerance
            && ur_dot < tolerance
    }
}

/// Sample the frame of `curve` at parameter `t`.
///
/// Position and tangent come from curve evaluation; up is `world_up`
/// rotated by the curve's authored orientation at `t`.
///
/// # Errors
///
/// Returns [`CurveError::DegenerateCurve`], naming the owning segment, where
/// the curve has no tangent at `t`. A tangent parallel to up is recovered
/// (see [`Frame::look_along`]).
pub fn frame_at<C: Curve + ?Sized>(curve: &C, t: f64, world_up: &Vector3<f64>) -> Result<Frame> {
    let t = t.clamp(0.0, 1.0);
    let tangent = curve.tangent_at(t);
    if tangent == Vector3::zeros() {
        return Err(CurveError::degenerate(
            curve.segment_at(t),
            "tangent has zero length",
        ));
    }
    let up = curve.orientation_at(t) * world_up;
    Frame::look_along(curve.point_at(t), tangent, up, t)
}

/// Sample the frame at arc length `s` from the start of `curve`.
///
/// # Errors
///
/// See [`frame_at`].
pub fn frame_at_distance<C: Curve + ?Sized>(
    curve: &C,
    s: f64,
    world_up: &Vector3<f64>,
) -> Result<Frame> {
    frame_at(curve, curve.arc_to_t(s), world_up)
}

/// Sample frames at each of `params`.
///
/// # Errors
///
/// Fails on the first degenerate sample.
pub fn frames_at<C: Curve + ?Sized>(
    curve: &C,
    params: &[f64],
    world_up: &Vector3<f64>,
) -> Result<Vec<Frame>> {
    params
        .iter()
        .map(|&t| frame_at(curve, t, world_up))
        .collect()
}
