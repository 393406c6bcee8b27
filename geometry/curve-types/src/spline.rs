//! Piecewise cubic splines through oriented knots.

use nalgebra::{Point3, UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::traits::DEGENERATE_EPSILON;
use crate::{CubicBezier, Curve, CurveError, Result};

/// A spline knot: a position with tangent handles and an authored rotation.
///
/// Tangents are offsets from `position` in world space. For a smooth knot
/// `tangent_in == -tangent_out`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Knot {
    /// Knot position.
    pub position: Point3<f64>,
    /// Offset to the incoming control point.
    pub tangent_in: Vector3<f64>,
    /// Offset to the outgoing control point.
    pub tangent_out: Vector3<f64>,
    /// Rotation applied to world up to get this knot's up.
    pub rotation: UnitQuaternion<f64>,
}

impl Knot {
    /// Create a knot with zero tangents and identity rotation.
    #[must_use]
    pub fn at(position: Point3<f64>) -> Self {
        Self {
            position,
            tangent_in: Vector3::zeros(),
            tangent_out: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Set symmetric tangents (`tangent_in = -tangent`).
    #[must_use]
    pub fn with_tangent(mut self, tangent: Vector3<f64>) -> Self {
        self.tangent_in = -tangent;
        self.tangent_out = tangent;
        self
    }

    /// Set the knot rotation.
    #[must_use]
    pub fn with_rotation(mut self, rotation: UnitQuaternion<f64>) -> Self {
        self.rotation = rotation;
        self
    }

    /// The knot's up vector for the given world up.
    #[must_use]
    pub fn up(&self, world_up: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * world_up
    }
}

/// A piecewise cubic spline.
///
/// An open spline with `n` knots has `n - 1` curves; a closed one has `n`,
/// the last curve joining the final knot back to the first. Knot index
/// arithmetic on closed splines wraps modulo the knot count.
///
/// The global parameter `t ∈ [0, 1]` is split evenly across curves.
///
/// # Example
///
/// ```
/// use curve_types::{Curve, Spline};
/// use nalgebra::Point3;
///
/// let spline = Spline::catmull_rom(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(2.0, 1.0, 0.0),
///     ],
///     false,
/// )
/// .unwrap();
///
/// assert_eq!(spline.curve_count(), 2);
/// assert!((spline.point_at(0.5) - Point3::new(1.0, 0.0, 0.0)).norm() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Spline {
    knots: Vec<Knot>,
    closed: bool,
}

impl Spline {
    /// Create a spline from knots.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InsufficientPoints`] with fewer than 2 knots.
    pub fn new(knots: Vec<Knot>, closed: bool) -> Result<Self> {
        if knots.len() < 2 {
            return Err(CurveError::insufficient_points(2, knots.len()));
        }
        Ok(Self { knots, closed })
    }

    /// Create a smooth spline through `points` with Catmull-Rom tangents.
    ///
    /// Open ends use a one-sided difference. All rotations are identity.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InsufficientPoints`] with fewer than 2 points.
    pub fn catmull_rom(points: Vec<Point3<f64>>, closed: bool) -> Result<Self> {
        let n = points.len();
        if n < 2 {
            return Err(CurveError::insufficient_points(2, n));
        }

        let knots = (0..n)
            .map(|i| {
                let tangent = if closed {
                    (points[(i + 1) % n] - points[(i + n - 1) % n]) / 6.0
                } else if i == 0 {
                    (points[1] - points[0]) / 3.0
                } else if i == n - 1 {
                    (points[n - 1] - points[n - 2]) / 3.0
                } else {
                    (points[i + 1] - points[i - 1]) / 6.0
                };
                Knot::at(points[i]).with_tangent(tangent)
            })
            .collect();

        Self::new(knots, closed)
    }

    /// The knots of this spline.
    #[must_use]
    pub fn knots(&self) -> &[Knot] {
        &self.knots
    }

    /// Number of knots.
    #[must_use]
    pub fn knot_count(&self) -> usize {
        self.knots.len()
    }

    /// Whether the last knot connects back to the first.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of cubic curves.
    #[must_use]
    pub fn curve_count(&self) -> usize {
        if self.closed {
            self.knots.len()
        } else {
            self.knots.len().saturating_sub(1)
        }
    }

    /// Knot at `index` taken modulo the knot count.
    #[must_use]
    pub fn knot_wrapped(&self, index: isize) -> &Knot {
        let n = self.knots.len() as isize;
        &self.knots[index.rem_euclid(n) as usize]
    }

    /// The knot `offset` places away from `index`.
    ///
    /// Wraps on closed splines; returns `None` past the ends of an open one.
    #[must_use]
    pub fn neighbor(&self, index: usize, offset: isize) -> Option<&Knot> {
        let n = self.knots.len() as isize;
        let target = index as isize + offset;
        if self.closed {
            Some(self.knot_wrapped(target))
        } else if (0..n).contains(&target) {
            self.knots.get(target as usize)
        } else {
            None
        }
    }

    /// The cubic Bézier for curve `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::SegmentOutOfRange`] if `index >= curve_count()`.
    pub fn curve(&self, index: usize) -> Result<CubicBezier> {
        let count = self.curve_count();
        if index >= count {
            return Err(CurveError::SegmentOutOfRange { index, count });
        }
        let (a, b) = self.knot_pair(index);
        Ok(CubicBezier::between(a, b))
    }

    /// Map a global parameter to `(curve index, local parameter)`.
    #[must_use]
    pub fn locate(&self, t: f64) -> (usize, f64) {
        let count = self.curve_count().max(1);
        let scaled = t.clamp(0.0, 1.0) * count as f64;
        let index = (scaled.floor() as usize).min(count - 1);
        (index, scaled - index as f64)
    }

    fn knot_pair(&self, index: usize) -> (&Knot, &Knot) {
        let n = self.knots.len();
        (&self.knots[index % n], &self.knots[(index + 1) % n])
    }
}

impl Curve for Spline {
    fn point_at(&self, t: f64) -> Point3<f64> {
        let (index, local) = self.locate(t);
        let (a, b) = self.knot_pair(index);
        CubicBezier::between(a, b).point_at(local)
    }

    fn derivative_at(&self, t: f64) -> Vector3<f64> {
        let (index, local) = self.locate(t);
        let (a, b) = self.knot_pair(index);
        CubicBezier::between(a, b).derivative_at(local) * self.curve_count() as f64
    }

    fn tangent_at(&self, t: f64) -> Vector3<f64> {
        let (index, local) = self.locate(t);
        let (a, b) = self.knot_pair(index);
        CubicBezier::between(a, b).tangent_at(local)
    }

    fn orientation_at(&self, t: f64) -> UnitQuaternion<f64> {
        let (index, local) = self.locate(t);
        let (a, b) = self.knot_pair(index);
        a.rotation
            .try_slerp(&b.rotation, local, DEGENERATE_EPSILON)
            .unwrap_or(if local < 0.5 { a.rotation } else { b.rotation })
    }

    fn segment_count(&self) -> usize {
        self.curve_count()
    }

    fn segment_at(&self, t: f64) -> usize {
        self.locate(t).0
    }

    fn validate(&self) -> Result<()> {
        // Deserialized splines bypass `new`.
        if self.knots.len() < 2 {
            return Err(CurveError::insufficient_points(2, self.knots.len()));
        }
        for index in 0..self.curve_count() {
            let (a, b) = self.knot_pair(index);
            if (b.position - a.position).norm() <= DEGENERATE_EPSILON {
                return Err(CurveError::degenerate(index, "consecutive knots coincide"));
            }
        }
        Ok(())
    }

    fn arc_length(&self) -> f64 {
        (0..self.curve_count())
            .filter_map(|i| self.curve(i).ok())
            .map(|c| c.arc_length())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn zigzag(closed: bool) -> Spline {
        Spline::catmull_rom(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(2.0, 2.0, 0.0),
                Point3::new(0.0, 2.0, 0.0),
            ],
            closed,
        )
        .unwrap()
    }

    #[test]
    fn test_curve_counts() {
        assert_eq!(zigzag(false).curve_count(), 3);
        assert_eq!(zigzag(true).curve_count(), 4);
        assert_eq!(zigzag(true).segment_count(), 4);
    }

    #[test]
    fn test_passes_through_knots() {
        let s = zigzag(false);
        for (i, knot) in s.knots().iter().enumerate() {
            let t = i as f64 / s.curve_count() as f64;
            assert_relative_eq!(s.point_at(t), knot.position, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_closed_last_curve_returns_to_start() {
        let s = zigzag(true);
        let last = s.curve(3).unwrap();
        assert_relative_eq!(last.p3, s.knots()[0].position);
        assert!(s.curve(4).is_err());
    }

    #[test]
    fn test_neighbor_wraps_only_when_closed() {
        let open = zigzag(false);
        assert!(open.neighbor(0, -1).is_none());
        assert!(open.neighbor(3, 1).is_none());
        assert_eq!(open.neighbor(1, 1).unwrap().position, Point3::new(2.0, 2.0, 0.0));

        let closed = zigzag(true);
        assert_eq!(closed.neighbor(0, -1).unwrap().position, Point3::new(0.0, 2.0, 0.0));
        assert_eq!(closed.neighbor(3, 2).unwrap().position, Point3::new(2.0, 0.0, 0.0));
        assert_eq!(closed.knot_wrapped(-1).position, Point3::new(0.0, 2.0, 0.0));
        assert_eq!(closed.knot_wrapped(5).position, Point3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_too_few_knots() {
        let err = Spline::catmull_rom(vec![Point3::origin()], false).unwrap_err();
        assert!(err.is_insufficient_points());
    }

    #[test]
    fn test_coincident_knots_degenerate() {
        let s = Spline::catmull_rom(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
            ],
            false,
        )
        .unwrap();
        let err = s.validate().unwrap_err();
        assert!(matches!(err, CurveError::DegenerateCurve { segment: 1, .. }));
    }

    #[test]
    fn test_orientation_slerps_between_knots() {
        let roll = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), FRAC_PI_2);
        let s = Spline::new(
            vec![
                Knot::at(Point3::origin()).with_tangent(Vector3::new(1.0, 0.0, 0.0)),
                Knot::at(Point3::new(3.0, 0.0, 0.0))
                    .with_tangent(Vector3::new(1.0, 0.0, 0.0))
                    .with_rotation(roll),
            ],
            false,
        )
        .unwrap();

        let mid = s.orientation_at(0.5);
        assert_relative_eq!(mid.angle(), FRAC_PI_2 / 2.0, epsilon = 1e-10);
        assert_relative_eq!(s.orientation_at(1.0).angle(), FRAC_PI_2, epsilon = 1e-10);
        assert_relative_eq!(
            s.knots()[1].up(&Vector3::z()),
            Vector3::new(0.0, -1.0, 0.0),
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_arc_length_of_straight_spline() {
        let s = Spline::catmull_rom(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
            ],
            false,
        )
        .unwrap();
        assert_relative_eq!(s.arc_length(), 2.0, epsilon = 1e-8);
        assert_relative_eq!(s.tangent_at(0.25), Vector3::x(), epsilon = 1e-10);
    }

    #[test]
    fn test_tangentless_knots_still_have_tangents() {
        let s = Spline::new(
            vec![
                Knot::at(Point3::new(0.0, 0.0, 0.0)),
                Knot::at(Point3::new(1.0, 0.0, 0.0)),
                Knot::at(Point3::new(1.0, 2.0, 0.0)),
            ],
            false,
        )
        .unwrap();

        assert_relative_eq!(s.derivative_at(0.5), Vector3::zeros());
        assert_relative_eq!(s.tangent_at(0.0), Vector3::x(), epsilon = 1e-12);
        // At the shared knot the outgoing piece owns the parameter.
        assert_relative_eq!(s.tangent_at(0.5), Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(s.tangent_at(1.0), Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn test_segment_at_follows_locate() {
        let s = zigzag(true);
        assert_eq!(s.segment_at(0.0), 0);
        assert_eq!(s.segment_at(0.3), 1);
        assert_eq!(s.segment_at(0.75), 3);
        assert_eq!(s.segment_at(1.0), 3);
    }
}
