//! Axis-aligned bounds of generated geometry.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned box around a set of vertex positions.
///
/// A box built from no points is empty: its `min` sits at `+inf` and its
/// `max` at `-inf`, so the first point added becomes both corners.
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3};
///
/// let ring = [Point3::new(0.0, -1.0, 0.0), Point3::new(2.0, 1.0, 0.5)];
/// let aabb = Aabb::from_points(ring.iter());
///
/// assert_eq!(aabb.center(), Point3::new(1.0, 0.0, 0.25));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Componentwise smallest position.
    pub min: Point3<f64>,
    /// Componentwise largest position.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Box containing nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point3::from(Vector3::repeat(f64::INFINITY)),
            max: Point3::from(Vector3::repeat(f64::NEG_INFINITY)),
        }
    }

    /// Tightest box around `points`.
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f64>>) -> Self {
        points.fold(Self::empty(), |mut aabb, p| {
            aabb.include(p);
            aabb
        })
    }

    /// True until a point has been included.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        (0..3).any(|axis| self.min[axis] > self.max[axis])
    }

    /// Extent along each axis, zero when empty.
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        if self.is_empty() {
            Vector3::zeros()
        } else {
            self.max - self.min
        }
    }

    /// Midpoint of the two corners.
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Grow to cover `point`.
    pub fn include(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn covers_a_ring_of_points() {
        let ring: Vec<_> = (0..8)
            .map(|i| {
                let angle = std::f64::consts::TAU * f64::from(i) / 8.0;
                Point3::new(3.0, 0.5 * angle.cos(), 0.5 * angle.sin())
            })
            .collect();
        let aabb = Aabb::from_points(ring.iter());

        assert_relative_eq!(aabb.size(), Vector3::new(0.0, 1.0, 1.0), epsilon = 1e-12);
        assert_relative_eq!(aabb.center(), Point3::new(3.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn empty_until_a_point_is_included() {
        let mut aabb = Aabb::default();
        assert!(aabb.is_empty());
        assert_eq!(aabb.size(), Vector3::zeros());

        let p = Point3::new(-1.0, 2.0, 4.0);
        aabb.include(&p);
        assert!(!aabb.is_empty());
        assert_eq!(aabb.min, p);
        assert_eq!(aabb.max, p);
    }
}
