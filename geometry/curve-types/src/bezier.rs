//! Cubic Bézier pieces between spline knots.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::traits::DEGENERATE_EPSILON;
use crate::{Curve, Knot};

/// One cubic piece of a [`Spline`](crate::Spline).
///
/// `p0` and `p3` are knot positions. The inner control points sit at the
/// outgoing tangent of the first knot and the incoming tangent of the second.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CubicBezier {
    /// Start knot position.
    pub p0: Point3<f64>,
    /// Start handle.
    pub p1: Point3<f64>,
    /// End handle.
    pub p2: Point3<f64>,
    /// End knot position.
    pub p3: Point3<f64>,
}

impl CubicBezier {
    /// Piece from four control points.
    #[must_use]
    pub const fn new(p0: Point3<f64>, p1: Point3<f64>, p2: Point3<f64>, p3: Point3<f64>) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Piece leaving `from` along its outgoing tangent and arriving at `to`
    /// along its incoming tangent.
    #[must_use]
    pub fn between(from: &Knot, to: &Knot) -> Self {
        Self::new(
            from.position,
            from.position + from.tangent_out,
            to.position + to.tangent_in,
            to.position,
        )
    }

    /// Second derivative at `t`.
    #[must_use]
    pub fn second_derivative_at(&self, t: f64) -> Vector3<f64> {
        let t = t.clamp(0.0, 1.0);
        let d0 = self.p1 - self.p0;
        let d1 = self.p2 - self.p1;
        let d2 = self.p3 - self.p2;
        (d1 - d0).lerp(&(d2 - d1), t) * 6.0
    }
}

impl Curve for CubicBezier {
    /// De Casteljau evaluation.
    fn point_at(&self, t: f64) -> Point3<f64> {
        let t = t.clamp(0.0, 1.0);
        let a = self.p0.lerp(&self.p1, t);
        let b = self.p1.lerp(&self.p2, t);
        let c = self.p2.lerp(&self.p3, t);
        let ab = a.lerp(&b, t);
        let bc = b.lerp(&c, t);
        ab.lerp(&bc, t)
    }

    /// Three times the quadratic hodograph.
    fn derivative_at(&self, t: f64) -> Vector3<f64> {
        let t = t.clamp(0.0, 1.0);
        let d0 = self.p1 - self.p0;
        let d1 = self.p2 - self.p1;
        let d2 = self.p3 - self.p2;
        let e0 = d0.lerp(&d1, t);
        let e1 = d1.lerp(&d2, t);
        e0.lerp(&e1, t) * 3.0
    }

    /// Unit tangent that survives handles collapsed onto their knots.
    ///
    /// Where the first derivative vanishes the curve still leaves along the
    /// second derivative; if that vanishes too, the chord is used.
    fn tangent_at(&self, t: f64) -> Vector3<f64> {
        if let Some(tangent) = self.derivative_at(t).try_normalize(DEGENERATE_EPSILON) {
            return tangent;
        }
        let chord = self.p3 - self.p0;
        self.second_derivative_at(t)
            .try_normalize(DEGENERATE_EPSILON)
            // Arriving at a stalled end, the curve travels against B''.
            .map(|d2| if d2.dot(&chord) < 0.0 { -d2 } else { d2 })
            .or_else(|| chord.try_normalize(DEGENERATE_EPSILON))
            .unwrap_or_else(Vector3::zeros)
    }
}
