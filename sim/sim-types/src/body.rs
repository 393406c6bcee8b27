//! Rigid body placement, velocity and mass types.

use nalgebra::{Matrix3, Point3, UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Result, SimError};

/// Unique identifier for a rigid body handed to the physics collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyId(pub u64);

impl BodyId {
    /// Create a new body ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for BodyId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Body({})", self.0)
    }
}

/// Position and orientation of a body or joint frame.
///
/// Local axes follow the curve frame convention: `+X` forward (along the
/// curve tangent), `+Y` up, `+Z` right.
///
/// # Example
///
/// ```
/// use sim_types::Pose;
/// use nalgebra::Point3;
///
/// let pose = Pose::from_position(Point3::new(1.0, 2.0, 3.0));
/// let world = pose.transform_point(&Point3::new(1.0, 0.0, 0.0));
/// assert_eq!(world, Point3::new(2.0, 2.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pose {
    /// Position in the parent space.
    pub position: Point3<f64>,
    /// Orientation as a unit quaternion.
    pub rotation: UnitQuaternion<f64>,
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose {
    /// Identity pose (origin, no rotation).
    #[must_use]
    pub fn identity() -> Self {
        Self {
            position: Point3::origin(),
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Pose from position only.
    #[must_use]
    pub fn from_position(position: Point3<f64>) -> Self {
        Self {
            position,
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Pose from position and rotation.
    #[must_use]
    pub const fn from_position_rotation(
        position: Point3<f64>,
        rotation: UnitQuaternion<f64>,
    ) -> Self {
        Self { position, rotation }
    }

    /// Transform a point from local to parent coordinates.
    #[must_use]
    pub fn transform_point(&self, local: &Point3<f64>) -> Point3<f64> {
        self.position + self.rotation * local.coords
    }

    /// Transform a vector from local to parent coordinates.
    #[must_use]
    pub fn transform_vector(&self, local: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * local
    }

    /// Local `+X` in parent coordinates.
    #[must_use]
    pub fn forward(&self) -> Vector3<f64> {
        self.transform_vector(&Vector3::x())
    }

    /// Local `+Y` in parent coordinates.
    #[must_use]
    pub fn up(&self) -> Vector3<f64> {
        self.transform_vector(&Vector3::y())
    }

    /// Local `+Z` in parent coordinates.
    #[must_use]
    pub fn right(&self) -> Vector3<f64> {
        self.transform_vector(&Vector3::z())
    }

    /// The inverse pose.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let inv_rotation = self.rotation.inverse();
        Self {
            position: Point3::from(-(inv_rotation * self.position.coords)),
            rotation: inv_rotation,
        }
    }

    /// Compose two poses: `self * other`.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            position: self.transform_point(&other.position),
            rotation: self.rotation * other.rotation,
        }
    }

    /// Pose translated along its own forward axis.
    #[must_use]
    pub fn advanced(&self, distance: f64) -> Self {
        Self {
            position: self.position + self.forward() * distance,
            rotation: self.rotation,
        }
    }

    /// Check if the pose contains `NaN` or `Inf` values.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.coords.iter().all(|x| x.is_finite())
            && self.rotation.coords.iter().all(|x| x.is_finite())
    }

    /// Check that the pose of `body` can be handed to a physics engine.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NonFinitePose`] naming `body`.
    pub fn validate_for(&self, body: BodyId) -> Result<()> {
        if self.is_finite() {
            Ok(())
        } else {
            Err(SimError::NonFinitePose { body })
        }
    }
}

/// Linear and angular velocity of a rigid body.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Twist {
    /// Linear velocity (m/s).
    pub linear: Vector3<f64>,
    /// Angular velocity (rad/s).
    pub angular: Vector3<f64>,
}

impl Default for Twist {
    fn default() -> Self {
        Self::zero()
    }
}

impl Twist {
    /// At rest.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            linear: Vector3::zeros(),
            angular: Vector3::zeros(),
        }
    }

    /// Linear velocity only.
    #[must_use]
    pub fn linear(v: Vector3<f64>) -> Self {
        Self {
            linear: v,
            angular: Vector3::zeros(),
        }
    }

    /// Linear speed.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.linear.norm()
    }
}

/// Mass properties of a rigid body.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MassProperties {
    /// Total mass in kg.
    pub mass: f64,
    /// Center of mass offset from body origin in local coordinates.
    pub center_of_mass: Vector3<f64>,
    /// Inertia tensor about center of mass in local coordinates (kg·m²).
    pub inertia: Matrix3<f64>,
}

impl MassProperties {
    /// Create mass properties with given values.
    #[must_use]
    pub const fn new(mass: f64, center_of_mass: Vector3<f64>, inertia: Matrix3<f64>) -> Self {
        Self {
            mass,
            center_of_mass,
            inertia,
        }
    }

    /// A uniform solid capsule whose axis is local `+X`.
    ///
    /// `length` is the cylinder part between the hemisphere centers. The
    /// cylinder and the two hemispheres share the mass by volume.
    ///
    /// - `I_axis = m_c r²/2 + 2 m_h (2/5) r²`
    /// - `I_perp = m_c (3r² + L²)/12 + 2 m_h (2r²/5 + L²/4 + 3Lr/8)`
    #[must_use]
    pub fn capsule(mass: f64, radius: f64, length: f64) -> Self {
        let r2 = radius * radius;
        let cylinder_volume = std::f64::consts::PI * r2 * length;
        let hemisphere_volume = 2.0 / 3.0 * std::f64::consts::PI * r2 * radius;
        let total = cylinder_volume + 2.0 * hemisphere_volume;

        let (m_c, m_h) = if total > 0.0 {
            (mass * cylinder_volume / total, mass * hemisphere_volume / total)
        } else {
            (0.0, 0.0)
        };

        let i_axis = 0.5 * m_c * r2 + 2.0 * m_h * 0.4 * r2;
        let i_perp = m_c * (3.0 * r2 + length * length) / 12.0
            + 2.0 * m_h * (0.4 * r2 + length * length / 4.0 + 3.0 * length * radius / 8.0);

        Self {
            mass,
            center_of_mass: Vector3::zeros(),
            inertia: Matrix3::from_diagonal(&Vector3::new(i_axis, i_perp, i_perp)),
        }
    }

    /// Validate that the mass properties are physically valid.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidMassProperties`] for negative or `NaN` mass,
    /// a non-finite center of mass, or an inertia tensor with a negative
    /// eigenvalue.
    pub fn validate(&self) -> Result<()> {
        if self.mass < 0.0 {
            return Err(SimError::invalid_mass("mass cannot be negative"));
        }

        if self.mass.is_nan() {
            return Err(SimError::invalid_mass("mass must be a number"));
        }

        if !self.center_of_mass.iter().all(|x| x.is_finite()) {
            return Err(SimError::invalid_mass("center of mass must be finite"));
        }

        let eigenvalues = self.inertia.symmetric_eigenvalues();
        if eigenvalues.iter().any(|&e| e < -1e-10) {
            return Err(SimError::invalid_mass(
                "inertia tensor must be positive semi-definite",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn body_id() {
        let id = BodyId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(id.to_string(), "Body(42)");

        let id2: BodyId = 42.into();
        assert_eq!(id, id2);
    }

    #[test]
    fn pose_axes_follow_frame_convention() {
        // Yaw 90° about Z turns forward +X into +Y.
        let pose = Pose::from_position_rotation(
            Point3::origin(),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2),
        );
        assert_relative_eq!(pose.forward(), Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(pose.up(), -Vector3::x(), epsilon = 1e-12);
        assert_relative_eq!(pose.right(), Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn pose_inverse_composes_to_identity() {
        let pose = Pose::from_position_rotation(
            Point3::new(1.0, 2.0, 3.0),
            UnitQuaternion::from_euler_angles(0.1, 0.2, 0.3),
        );

        let composed = pose.compose(&pose.inverse());
        assert_relative_eq!(composed.position.coords, Vector3::zeros(), epsilon = 1e-10);
        assert_relative_eq!(composed.rotation.angle(), 0.0, epsilon = 1e-10);

        let p = Point3::new(-0.5, 4.0, 1.0);
        assert_relative_eq!(
            pose.inverse().transform_point(&pose.transform_point(&p)),
            p,
            epsilon = 1e-10
        );
    }

    #[test]
    fn non_finite_pose_names_its_body() {
        assert!(Pose::identity().validate_for(BodyId::new(0)).is_ok());

        let pose = Pose::from_position(Point3::new(f64::NAN, 0.0, 0.0));
        assert_eq!(
            pose.validate_for(BodyId::new(7)),
            Err(SimError::NonFinitePose { body: BodyId::new(7) })
        );
    }

    #[test]
    fn advanced_moves_along_forward() {
        let pose = Pose::from_position_rotation(
            Point3::new(1.0, 0.0, 0.0),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2),
        );
        assert_relative_eq!(pose.advanced(2.0).position, Point3::new(1.0, 2.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn capsule_mass_properties() {
        let props = MassProperties::capsule(2.0, 0.1, 0.5);
        assert_relative_eq!(props.mass, 2.0);
        // Long axis is the easy one to spin about.
        assert!(props.inertia[(0, 0)] < props.inertia[(1, 1)]);
        assert_relative_eq!(props.inertia[(1, 1)], props.inertia[(2, 2)]);
        assert!(props.validate().is_ok());

        // Zero length collapses to a sphere: I = 2/5 m r².
        let sphere = MassProperties::capsule(1.0, 1.0, 0.0);
        assert_relative_eq!(sphere.inertia[(0, 0)], 0.4, epsilon = 1e-12);
        assert_relative_eq!(sphere.inertia[(1, 1)], 0.4, epsilon = 1e-12);
    }

    #[test]
    fn mass_validation() {
        let thin_rod = MassProperties::capsule(0.3, 0.0, 1.0);
        assert!(thin_rod.validate().is_ok());
        assert_eq!(thin_rod.inertia, Matrix3::zeros());

        let nan = MassProperties::capsule(f64::NAN, 0.1, 1.0);
        assert!(nan.validate().unwrap_err().is_mass_error());

        let negative = MassProperties::new(-1.0, Vector3::zeros(), Matrix3::identity());
        assert!(negative.validate().is_err());
    }
}
