//! Authored rope curves.

use curve_types::{Curve, CurveError, LineSegment, Spline};
use nalgebra::{Point3, UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The control data a rope is generated from.
///
/// This is the snapshot compared by
/// [`regeneration_decision`](crate::regeneration_decision): any change to it
/// rebuilds the rope.
///
/// # Example
///
/// ```
/// use curve_types::Curve;
/// use rope_rig::CurveSpec;
/// use nalgebra::Point3;
///
/// let straight = CurveSpec::segment(Point3::origin(), Point3::new(0.0, 2.0, 0.0));
/// assert!((straight.arc_length() - 2.0).abs() < 1e-12);
///
/// let sagging = CurveSpec::through(vec![
///     Point3::new(0.0, 0.0, 2.0),
///     Point3::new(1.0, 0.0, 1.5),
///     Point3::new(2.0, 0.0, 2.0),
/// ])
/// .unwrap();
/// assert_eq!(sagging.segment_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CurveSpec {
    /// Straight rope between two points.
    Segment {
        /// Start point.
        start: Point3<f64>,
        /// End point.
        end: Point3<f64>,
    },
    /// Rope following a spline.
    Spline(Spline),
}

impl CurveSpec {
    /// Straight rope from `start` to `end`.
    #[must_use]
    pub fn segment(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self::Segment { start, end }
    }

    /// Open Catmull-Rom spline through `points`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InsufficientPoints`] with fewer than 2 points.
    pub fn through(points: Vec<Point3<f64>>) -> Result<Self, CurveError> {
        Spline::catmull_rom(points, false).map(Self::Spline)
    }
}

impl From<LineSegment> for CurveSpec {
    fn from(line: LineSegment) -> Self {
        Self::segment(line.start, line.end)
    }
}

impl From<Spline> for CurveSpec {
    fn from(spline: Spline) -> Self {
        Self::Spline(spline)
    }
}

impl Curve for CurveSpec {
    fn point_at(&self, t: f64) -> Point3<f64> {
        match self {
            Self::Segment { start, end } => LineSegment::new(*start, *end).point_at(t),
            Self::Spline(spline) => spline.point_at(t),
        }
    }

    fn derivative_at(&self, t: f64) -> Vector3<f64> {
        match self {
            Self::Segment { start, end } => LineSegment::new(*start, *end).derivative_at(t),
            Self::Spline(spline) => spline.derivative_at(t),
        }
    }

    fn tangent_at(&self, t: f64) -> Vector3<f64> {
        match self {
            Self::Segment { start, end } => LineSegment::new(*start, *end).tangent_at(t),
            Self::Spline(spline) => spline.tangent_at(t),
        }
    }

    fn orientation_at(&self, t: f64) -> UnitQuaternion<f64> {
        match self {
            Self::Segment { .. } => UnitQuaternion::identity(),
            Self::Spline(spline) => spline.orientation_at(t),
        }
    }

    fn segment_count(&self) -> usize {
        match self {
            Self::Segment { .. } => 1,
            Self::Spline(spline) => spline.segment_count(),
        }
    }

    fn segment_at(&self, t: f64) -> usize {
        match self {
            Self::Segment { .. } => 0,
            Self::Spline(spline) => spline.segment_at(t),
        }
    }

    fn validate(&self) -> Result<(), CurveError> {
        match self {
            Self::Segment { start, end } => LineSegment::new(*start, *end).validate(),
            Self::Spline(spline) => spline.validate(),
        }
    }

    fn arc_length(&self) -> f64 {
        match self {
            Self::Segment { start, end } => (end - start).norm(),
            Self::Spline(spline) => spline.arc_length(),
        }
    }

    fn arc_length_between(&self, t0: f64, t1: f64) -> f64 {
        match self {
            Self::Segment { start, end } => {
                LineSegment::new(*start, *end).arc_length_between(t0, t1)
            }
            Self::Spline(spline) => spline.arc_length_between(t0, t1),
        }
    }
}
