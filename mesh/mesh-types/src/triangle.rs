//! Resolved triangle faces.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One face of a generated mesh with its corner positions looked up.
///
/// Corners are stored in winding order. A face seen from outside the tube
/// winds counter-clockwise, so [`Triangle::normal`] points away from the
/// surface interior.
///
/// # Example
///
/// ```
/// use mesh_types::{Triangle, Point3};
///
/// let face = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
///
/// assert!((face.area() - 0.5).abs() < 1e-10);
/// assert!(face.normal().is_some_and(|n| n.z > 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// Corners in winding order.
    pub corners: [Point3<f64>; 3],
}

impl Triangle {
    /// Face from three corners in winding order.
    #[inline]
    #[must_use]
    pub const fn new(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Self {
        Self { corners: [a, b, c] }
    }

    /// Cross product of the two edges leaving the first corner.
    ///
    /// Length is twice the area, which makes it the area weight used when
    /// averaging vertex normals.
    #[inline]
    #[must_use]
    pub fn scaled_normal(&self) -> Vector3<f64> {
        let [a, b, c] = self.corners;
        (b - a).cross(&(c - a))
    }

    /// Unit normal, or `None` when the face has collapsed to a line or point.
    ///
    /// Collapsed faces appear at cap fans and at pinched rings.
    #[must_use]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        self.scaled_normal().try_normalize(f64::EPSILON)
    }

    /// Face area.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.scaled_normal().norm() * 0.5
    }

    /// Average of the three corners.
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        let [a, b, c] = self.corners;
        Point3::from((a.coords + b.coords + c.coords) / 3.0)
    }

    /// Signed volume of the tetrahedron spanned with the origin.
    ///
    /// Summed over a closed, outward-wound surface this gives its enclosed
    /// volume.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        let [a, b, c] = self.corners;
        a.coords.dot(&b.coords.cross(&c.coords)) / 6.0
    }
}
