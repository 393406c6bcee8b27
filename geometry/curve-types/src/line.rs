//! Straight line segment.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::traits::DEGENERATE_EPSILON;
use crate::{Curve, CurveError, Result};

/// A straight segment from `start` to `end`.
///
/// The simplest rope: two authored endpoints, no orientation data.
///
/// # Example
///
/// ```
/// use curve_types::{Curve, LineSegment};
/// use nalgebra::Point3;
///
/// let line = LineSegment::new(Point3::origin(), Point3::new(0.0, 3.0, 4.0));
/// assert!((line.arc_length() - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineSegment {
    /// Start point.
    pub start: Point3<f64>,
    /// End point.
    pub end: Point3<f64>,
}

impl LineSegment {
    /// Create a new line segment.
    #[must_use]
    pub const fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }

    /// Vector from start to end.
    #[must_use]
    pub fn direction(&self) -> Vector3<f64> {
        self.end - self.start
    }
}

impl Curve for LineSegment {
    fn point_at(&self, t: f64) -> Point3<f64> {
        let t = t.clamp(0.0, 1.0);
        self.start + self.direction() * t
    }

    fn derivative_at(&self, _t: f64) -> Vector3<f64> {
        self.direction()
    }

    fn validate(&self) -> Result<()> {
        if self.direction().norm() <= DEGENERATE_EPSILON {
            return Err(CurveError::degenerate(0, "start and end coincide"));
        }
        Ok(())
    }

    fn arc_length(&self) -> f64 {
        self.direction().norm()
    }

    fn arc_length_between(&self, t0: f64, t1: f64) -> f64 {
        (t1.clamp(0.0, 1.0) - t0.clamp(0.0, 1.0)).abs() * self.arc_length()
    }

    fn arc_to_t(&self, s: f64) -> f64 {
        let length = self.arc_length();
        if length <= DEGENERATE_EPSILON {
            return 0.0;
        }
        (s / length).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_line_evaluation() {
        let line = LineSegment::new(Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 2.0, 0.0));
        assert_relative_eq!(line.point_at(0.5), Point3::new(1.0, 1.0, 0.0));
        assert_relative_eq!(line.tangent_at(0.3), Vector3::y());
        assert_relative_eq!(line.arc_length(), 2.0);
        assert_relative_eq!(line.arc_to_t(0.5), 0.25);
        assert_relative_eq!(line.arc_length_between(0.75, 0.25), 1.0);
    }

    #[test]
    fn test_coincident_endpoints_are_degenerate() {
        let p = Point3::new(2.0, 2.0, 2.0);
        let err = LineSegment::new(p, p).validate().unwrap_err();
        assert!(err.is_degenerate_curve());
        assert_relative_eq!(LineSegment::new(p, p).arc_to_t(1.0), 0.0);
    }
}
