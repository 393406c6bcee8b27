//! Piecewise linear paths.
//!
//! Used for sampled rope centerlines and for driving bodies along a
//! sequence of waypoints.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::traits::DEGENERATE_EPSILON;
use crate::{Curve, CurveError, Result};

/// A piecewise linear curve through a sequence of points.
///
/// The parameter `t ∈ [0, 1]` is arc-length based: `t = 0.5` is the point
/// at half the total length.
///
/// # Example
///
/// ```
/// use curve_types::{Curve, Polyline};
/// use nalgebra::Point3;
///
/// let path = Polyline::new(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
/// ])
/// .unwrap();
///
/// assert!((path.arc_length() - 2.0).abs() < 1e-12);
/// assert!((path.point_at(0.5) - Point3::new(1.0, 0.0, 0.0)).norm() < 1e-12);
/// ```
///
/// Serialized as its point list; deserializing goes through [`Polyline::new`],
/// so short lists are rejected and arc lengths are rebuilt.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Point3<f64>>", into = "Vec<Point3<f64>>")
)]
pub struct Polyline {
    points: Vec<Point3<f64>>,
    /// Arc length at each point.
    cumulative: Vec<f64>,
}

impl Polyline {
    /// Create a polyline.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InsufficientPoints`] with fewer than 2 points.
    pub fn new(points: Vec<Point3<f64>>) -> Result<Self> {
        if points.len() < 2 {
            return Err(CurveError::insufficient_points(2, points.len()));
        }

        let mut cumulative = Vec::with_capacity(points.len());
        let mut total = 0.0;
        cumulative.push(0.0);
        for pair in points.windows(2) {
            total += (pair[1] - pair[0]).norm();
            cumulative.push(total);
        }

        Ok(Self { points, cumulative })
    }

    /// Sample `curve` into a polyline of `samples` points (at least 2).
    #[must_use]
    pub fn from_curve<C: Curve + ?Sized>(curve: &C, samples: usize) -> Self {
        let points = curve.sample_uniform(samples.max(2));
        // sample_uniform always yields at least 2 points
        Self::new(points).unwrap_or_else(|_| Self {
            points: vec![curve.start(), curve.end()],
            cumulative: vec![0.0, (curve.end() - curve.start()).norm()],
        })
    }

    /// The points of the polyline.
    #[must_use]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Number of straight segments.
    #[must_use]
    pub fn num_segments(&self) -> usize {
        self.points.len() - 1
    }

    /// Segment `index` as a `(start, end)` pair.
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<(Point3<f64>, Point3<f64>)> {
        Some((*self.points.get(index)?, *self.points.get(index + 1)?))
    }

    /// Total length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Point at arc length `distance` from the first point, clamped to the ends.
    #[must_use]
    pub fn point_at_distance(&self, distance: f64) -> Point3<f64> {
        let (index, local) = self.locate(distance);
        let a = self.points[index];
        let b = self.points[index + 1];
        a + (b - a) * local
    }

    /// Map an arc length to `(segment index, local parameter)`.
    fn locate(&self, distance: f64) -> (usize, f64) {
        let last = self.num_segments() - 1;
        if distance <= 0.0 {
            return (0, 0.0);
        }
        if distance >= self.length() {
            return (last, 1.0);
        }

        // First cumulative entry strictly greater than distance ends the segment.
        let end = self.cumulative.partition_point(|&c| c <= distance);
        let index = end.saturating_sub(1).min(last);
        let span = self.cumulative[index + 1] - self.cumulative[index];
        let local = if span > DEGENERATE_EPSILON {
            (distance - self.cumulative[index]) / span
        } else {
            0.0
        };
        (index, local)
    }
}

impl TryFrom<Vec<Point3<f64>>> for Polyline {
    type Error = CurveError;

    fn try_from(points: Vec<Point3<f64>>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<Polyline> for Vec<Point3<f64>> {
    fn from(polyline: Polyline) -> Self {
        polyline.points
    }
}

impl Curve for Polyline {
    fn point_at(&self, t: f64) -> Point3<f64> {
        self.point_at_distance(t.clamp(0.0, 1.0) * self.length())
    }

    fn derivative_at(&self, t: f64) -> Vector3<f64> {
        let (index, _) = self.locate(t.clamp(0.0, 1.0) * self.length());
        let a = self.points[index];
        let b = self.points[index + 1];
        let span = (b - a).norm();
        if span <= DEGENERATE_EPSILON {
            return Vector3::zeros();
        }
        (b - a) * (self.length() / span)
    }

    fn segment_count(&self) -> usize {
        self.num_segments()
    }

    fn segment_at(&self, t: f64) -> usize {
        self.locate(t.clamp(0.0, 1.0) * self.length()).0
    }

    fn validate(&self) -> Result<()> {
        for (index, pair) in self.points.windows(2).enumerate() {
            if (pair[1] - pair[0]).norm() <= DEGENERATE_EPSILON {
                return Err(CurveError::degenerate(index, "consecutive points coincide"));
            }
        }
        Ok(())
    }

    fn arc_length(&self) -> f64 {
        self.length()
    }

    fn arc_length_between(&self, t0: f64, t1: f64) -> f64 {
        (t1.clamp(0.0, 1.0) - t0.clamp(0.0, 1.0)).abs() * self.length()
    }

    fn arc_to_t(&self, s: f64) -> f64 {
        let length = self.length();
        if length <= DEGENERATE_EPSILON {
            return 0.0;
        }
        (s / length).clamp(0.0, 1.0)
    }
}
