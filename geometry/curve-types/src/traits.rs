//! Core curve trait.

use nalgebra::{Point3, UnitQuaternion, Vector3};

use crate::{CurveError, Result};

/// Lengths and derivative magnitudes below this are treated as zero.
pub const DEGENERATE_EPSILON: f64 = 1e-9;

const ARC_TOLERANCE: f64 = 1e-10;
const ARC_SEARCH_STEPS: usize = 50;

/// A parametric curve in 3D space.
///
/// All curves are parameterized over `t ∈ [0, 1]`, where `t=0` is the start
/// and `t=1` is the end of the curve.
///
/// # Implementors
///
/// - [`LineSegment`](crate::LineSegment) - Straight rope between two points
/// - [`CubicBezier`](crate::CubicBezier) - Single cubic Bézier segment
/// - [`Spline`](crate::Spline) - Piecewise cubic spline through knots
/// - [`Polyline`](crate::Polyline) - Piecewise linear path
pub trait Curve {
    /// Evaluate the curve position at parameter `t ∈ [0, 1]`.
    fn point_at(&self, t: f64) -> Point3<f64>;

    /// Compute the first derivative (velocity) at parameter `t`.
    fn derivative_at(&self, t: f64) -> Vector3<f64>;

    /// Compute the unit tangent vector at parameter `t`.
    ///
    /// The default normalizes the derivative and returns the zero vector where
    /// it vanishes. Curves that stall at regular points (splines with
    /// tangentless knots) override this with a fallback direction.
    /// [`frame_at`](crate::frame_at) reports a zero tangent as
    /// [`CurveError::DegenerateCurve`].
    fn tangent_at(&self, t: f64) -> Vector3<f64> {
        self.derivative_at(t)
            .try_normalize(DEGENERATE_EPSILON)
            .unwrap_or_else(Vector3::zeros)
    }

    /// Authored orientation at parameter `t`.
    ///
    /// Rotates the world up vector into the curve's local up. Curves with no
    /// orientation data return identity.
    fn orientation_at(&self, _t: f64) -> UnitQuaternion<f64> {
        UnitQuaternion::identity()
    }

    /// Number of authored segments making up the curve.
    fn segment_count(&self) -> usize {
        1
    }

    /// Index of the authored segment that owns parameter `t`.
    fn segment_at(&self, _t: f64) -> usize {
        0
    }

    /// Check the curve for zero-length segments.
    ///
    /// The default checks the total arc length only.
    fn validate(&self) -> Result<()> {
        if self.arc_length() <= DEGENERATE_EPSILON {
            return Err(CurveError::degenerate(0, "curve has zero length"));
        }
        Ok(())
    }

    /// Compute the total arc length of the curve.
    fn arc_length(&self) -> f64 {
        self.arc_length_between(0.0, 1.0)
    }

    /// Compute the arc length between two parameter values.
    ///
    /// Always non-negative.
    fn arc_length_between(&self, t0: f64, t1: f64) -> f64 {
        let (start, end) = if t0 < t1 { (t0, t1) } else { (t1, t0) };
        adaptive_simpson(&|t| self.derivative_at(t).norm(), start, end, ARC_TOLERANCE, 20)
    }

    /// Parameter at arc length `s` from the start, by bisection.
    ///
    /// Lengths outside `[0, arc_length()]` clamp to the ends.
    fn arc_to_t(&self, s: f64) -> f64 {
        if s <= 0.0 {
            return 0.0;
        }
        if s >= self.arc_length() {
            return 1.0;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        for _ in 0..ARC_SEARCH_STEPS {
            let mid = 0.5 * (lo + hi);
            let error = self.arc_length_between(0.0, mid) - s;
            if error.abs() < ARC_TOLERANCE {
                return mid;
            }
            if error < 0.0 { lo = mid } else { hi = mid }
        }
        0.5 * (lo + hi)
    }

    /// `n` points at evenly spaced parameters, ends included. At least two.
    fn sample_uniform(&self, n: usize) -> Vec<Point3<f64>> {
        let last = n.max(2) - 1;
        (0..=last)
            .map(|i| self.point_at(i as f64 / last as f64))
            .collect()
    }

    /// Get the start point of the curve (`t=0`).
    fn start(&self) -> Point3<f64> {
        self.point_at(0.0)
    }

    /// Get the end point of the curve (`t=1`).
    fn end(&self) -> Point3<f64> {
        self.point_at(1.0)
    }
}

/// Unit vector perpendicular to `v`, built from the world axis least
/// aligned with it.
pub(crate) fn arbitrary_perpendicular(v: &Vector3<f64>) -> Vector3<f64> {
    let reference = if v.x.abs() <= v.y.abs().min(v.z.abs()) {
        Vector3::x()
    } else if v.y.abs() <= v.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };
    v.cross(&reference).normalize()
}

/// Integral of `f` over `[a, b]` by adaptive Simpson quadrature.
fn adaptive_simpson(f: &dyn Fn(f64) -> f64, a: f64, b: f64, tolerance: f64, depth: usize) -> f64 {
    let simpson = |lo: f64, hi: f64| (hi - lo) / 6.0 * (f(lo) + 4.0 * f(0.5 * (lo + hi)) + f(hi));

    fn refine(
        simpson: &dyn Fn(f64, f64) -> f64,
        a: f64,
        b: f64,
        whole: f64,
        tolerance: f64,
        depth: usize,
    ) -> f64 {
        let mid = 0.5 * (a + b);
        let (left, right) = (simpson(a, mid), simpson(mid, b));
        let delta = left + right - whole;
        if depth == 0 || delta.abs() < 15.0 * tolerance {
            // Richardson correction.
            left + right + delta / 15.0
        } else {
            refine(simpson, a, mid, left, tolerance / 2.0, depth - 1)
                + refine(simpson, mid, b, right, tolerance / 2.0, depth - 1)
        }
    }

    if b <= a {
        return 0.0;
    }
    refine(&simpson, a, b, simpson(a, b), tolerance, depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct Parabola;

    impl Curve for Parabola {
        fn point_at(&self, t: f64) -> Point3<f64> {
            Point3::new(t, t * t, 0.0)
        }

        fn derivative_at(&self, t: f64) -> Vector3<f64> {
            Vector3::new(1.0, 2.0 * t, 0.0)
        }
    }

    struct Stuck;

    impl Curve for Stuck {
        fn point_at(&self, _t: f64) -> Point3<f64> {
            Point3::new(1.0, 1.0, 1.0)
        }

        fn derivative_at(&self, _t: f64) -> Vector3<f64> {
            Vector3::zeros()
        }
    }

    #[test]
    fn test_parabola_arc_length() {
        // ∫₀¹ √(1 + 4t²) dt = (2√5 + asinh 2) / 4
        let expected = (2.0 * 5.0_f64.sqrt() + 2.0_f64.asinh()) / 4.0;
        assert_relative_eq!(Parabola.arc_length(), expected, epsilon = 1e-8);
    }

    #[test]
    fn test_arc_to_t_inverts_length() {
        let total = Parabola.arc_length();
        let t = Parabola.arc_to_t(total * 0.3);
        assert_relative_eq!(
            Parabola.arc_length_between(0.0, t),
            total * 0.3,
            epsilon = 1e-8
        );
        assert_relative_eq!(Parabola.arc_to_t(-1.0), 0.0);
        assert_relative_eq!(Parabola.arc_to_t(total + 1.0), 1.0);
    }

    #[test]
    fn test_default_validate_rejects_zero_length() {
        assert!(Parabola.validate().is_ok());
        let err = Stuck.validate().unwrap_err();
        assert!(err.is_degenerate_curve());
    }

    #[test]
    fn test_tangent_of_stationary_curve_is_zero() {
        assert_relative_eq!(Stuck.tangent_at(0.5).norm(), 0.0);
        assert_relative_eq!(Parabola.tangent_at(0.5).norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_arbitrary_perpendicular() {
        for v in [Vector3::x(), Vector3::y(), Vector3::z(), Vector3::new(1.0, 2.0, 3.0)] {
            let p = arbitrary_perpendicular(&v);
            assert_relative_eq!(p.norm(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(p.dot(&v), 0.0, epsilon = 1e-12);
        }
    }
}
