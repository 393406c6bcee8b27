//! Joint specifications handed to the physics collaborator.
//!
//! A [`JointSpec`] only describes a constraint: which bodies it connects,
//! where it attaches on each and how far it may move. Solving is left to the
//! physics engine.

use nalgebra::{Point3, Vector3};
use sim_types::{BodyId, Pose};

use crate::{ConstraintError, JointLimits, RagdollLimits, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Below this length an axis is considered degenerate.
const AXIS_EPSILON: f64 = 1e-9;

/// Kind of constraint and its limits.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JointKind {
    /// Ball and socket: the anchors coincide, rotation is free.
    BallAndSocket,
    /// Swing of the twist axis bounded by a cone, rotation about it bounded
    /// by `twist`.
    ConeTwist {
        /// Cone half-angle (radians).
        max_cone: f64,
        /// Twist range (radians).
        twist: JointLimits,
    },
    /// Swing of the perpendicular axis out of the plane normal to the twist
    /// axis, bounded by `limits`.
    PerpendicularCone {
        /// Swing range (radians).
        limits: JointLimits,
    },
    /// Translation along the frame axis bounded by `limits`, no rotation.
    Prismatic {
        /// Travel range (meters).
        limits: JointLimits,
    },
}

impl JointKind {
    /// Degrees of freedom left to the connected bodies.
    #[must_use]
    pub fn dof(&self) -> usize {
        match self {
            Self::BallAndSocket | Self::ConeTwist { .. } => 3,
            Self::PerpendicularCone { .. } => 2,
            Self::Prismatic { .. } => 1,
        }
    }

    /// Degrees of freedom removed by this joint.
    #[must_use]
    pub fn constrained_dof(&self) -> usize {
        6 - self.dof()
    }

    /// Short lowercase name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::BallAndSocket => "ball_and_socket",
            Self::ConeTwist { .. } => "cone_twist",
            Self::PerpendicularCone { .. } => "perpendicular_cone",
            Self::Prismatic { .. } => "prismatic",
        }
    }
}

impl std::fmt::Display for JointKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Attachment frame of a joint on one body.
///
/// `axis` is the twist / travel axis and `perpendicular_axis` the secondary
/// axis, both unit length and orthogonal, in the body's local space (or world
/// space for the world side of an anchor).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointFrame {
    /// Anchor point.
    pub position: Point3<f64>,
    /// Primary axis.
    pub axis: Vector3<f64>,
    /// Secondary axis.
    pub perpendicular_axis: Vector3<f64>,
}

impl Default for JointFrame {
    fn default() -> Self {
        Self::identity()
    }
}

impl JointFrame {
    /// Frame at the origin with axis `+X` and perpendicular `+Y`.
    #[must_use]
    pub fn identity() -> Self {
        Self::at(Point3::origin())
    }

    /// Frame at `position` with axis `+X` and perpendicular `+Y`.
    #[must_use]
    pub fn at(position: Point3<f64>) -> Self {
        Self {
            position,
            axis: Vector3::x(),
            perpendicular_axis: Vector3::y(),
        }
    }

    /// Frame with explicit axes.
    ///
    /// `axis` is normalized and `perpendicular` is made orthogonal to it.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::DegenerateAxis`] if `axis` has zero length
    /// or `perpendicular` is parallel to it.
    pub fn new(position: Point3<f64>, axis: Vector3<f64>, perpendicular: Vector3<f64>) -> Result<Self> {
        let axis = axis
            .try_normalize(AXIS_EPSILON)
            .ok_or_else(|| ConstraintError::degenerate_axis("joint axis has zero length"))?;
        let perpendicular_axis = (perpendicular - axis * axis.dot(&perpendicular))
            .try_normalize(AXIS_EPSILON)
            .ok_or_else(|| {
                ConstraintError::degenerate_axis("perpendicular axis is parallel to joint axis")
            })?;
        Ok(Self {
            position,
            axis,
            perpendicular_axis,
        })
    }

    /// Frame whose axis is the pose's forward and perpendicular its up.
    #[must_use]
    pub fn from_pose(pose: &Pose) -> Self {
        Self {
            position: pose.position,
            axis: pose.forward(),
            perpendicular_axis: pose.up(),
        }
    }

    /// Check if the axes are orthonormal within tolerance.
    #[must_use]
    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        (self.axis.norm() - 1.0).abs() < tolerance
            && (self.perpendicular_axis.norm() - 1.0).abs() < tolerance
            && self.axis.dot(&self.perpendicular_axis).abs() < tolerance
    }
}

/// A joint between a body and another body or the world.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointSpec {
    /// First body.
    pub body_a: BodyId,
    /// Second body, or `None` for the static world.
    pub body_b: Option<BodyId>,
    /// Attachment on `body_a`, in its local space.
    pub frame_a: JointFrame,
    /// Attachment on `body_b`, or in world space when `body_b` is `None`.
    pub frame_b: JointFrame,
    /// Constraint kind and limits.
    pub kind: JointKind,
}

impl JointSpec {
    /// Joint between two bodies.
    #[must_use]
    pub fn between(
        body_a: BodyId,
        body_b: BodyId,
        frame_a: JointFrame,
        frame_b: JointFrame,
        kind: JointKind,
    ) -> Self {
        Self {
            body_a,
            body_b: Some(body_b),
            frame_a,
            frame_b,
            kind,
        }
    }

    /// Joint between a body and the world.
    #[must_use]
    pub fn to_world(body: BodyId, frame: JointFrame, world_frame: JointFrame, kind: JointKind) -> Self {
        Self {
            body_a: body,
            body_b: None,
            frame_a: frame,
            frame_b: world_frame,
            kind,
        }
    }

    /// Whether one side is the static world.
    #[must_use]
    pub fn is_world_anchored(&self) -> bool {
        self.body_b.is_none()
    }

    /// Whether this joint connects `body`.
    #[must_use]
    pub fn involves(&self, body: BodyId) -> bool {
        self.body_a == body || self.body_b == Some(body)
    }
}

/// The two joints of a ragdoll constraint between `body_a` and `body_b`.
///
/// Both joints share the same attachment frames. The first is the cone and
/// twist joint, the second the perpendicular cone.
///
/// # Example
///
/// ```
/// use sim_constraint::{JointFrame, JointKind, RagdollLimits, ragdoll_pair};
/// use sim_types::BodyId;
/// use nalgebra::Point3;
///
/// let [primary, perpendicular] = ragdoll_pair(
///     BodyId::new(0),
///     BodyId::new(1),
///     JointFrame::at(Point3::new(0.25, 0.0, 0.0)),
///     JointFrame::identity(),
///     &RagdollLimits::default(),
/// );
/// assert!(matches!(primary.kind, JointKind::ConeTwist { .. }));
/// assert!(matches!(perpendicular.kind, JointKind::PerpendicularCone { .. }));
/// ```
#[must_use]
pub fn ragdoll_pair(
    body_a: BodyId,
    body_b: BodyId,
    frame_a: JointFrame,
    frame_b: JointFrame,
    limits: &RagdollLimits,
) -> [JointSpec; 2] {
    [
        JointSpec::between(
            body_a,
            body_b,
            frame_a,
            frame_b,
            JointKind::ConeTwist {
                max_cone: limits.max_cone,
                twist: limits.twist,
            },
        ),
        JointSpec::between(
            body_a,
            body_b,
            frame_a,
            frame_b,
            JointKind::PerpendicularCone {
                limits: limits.perpendicular,
            },
        ),
    ]
}

/// Pin `local_anchor` on `body` to `world_point` with a ball and socket.
#[must_use]
pub fn anchor(body: BodyId, local_anchor: Point3<f64>, world_point: Point3<f64>) -> JointSpec {
    JointSpec::to_world(
        body,
        JointFrame::at(local_anchor),
        JointFrame::at(world_point),
        JointKind::BallAndSocket,
    )
}

/// Prismatic joint letting `body` slide from world point `a` toward `b`.
///
/// The axis is `normalize(b - a)` on both sides; the body's frame sits at its
/// origin and the world frame at `a`. Travel is limited to `[0, |b - a|]`.
///
/// # Errors
///
/// Returns [`ConstraintError::DegenerateAxis`] if `a` and `b` coincide.
pub fn prismatic_between(body: BodyId, a: Point3<f64>, b: Point3<f64>) -> Result<JointSpec> {
    let direction = b - a;
    let distance = direction.norm();
    let axis = direction
        .try_normalize(AXIS_EPSILON)
        .ok_or_else(|| ConstraintError::degenerate_axis("prismatic endpoints coincide"))?;

    // Any perpendicular works; prefer the one closest to +Y.
    let reference = if axis.y.abs() < 0.9 { Vector3::y() } else { Vector3::x() };
    let frame = JointFrame::new(Point3::origin(), axis, reference)?;

    Ok(JointSpec::to_world(
        body,
        frame,
        JointFrame { position: a, ..frame },
        JointKind::Prismatic {
            limits: JointLimits::travel(distance),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::UnitQuaternion;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn kind_dof() {
        assert_eq!(JointKind::BallAndSocket.dof(), 3);
        assert_eq!(
            JointKind::Prismatic {
                limits: JointLimits::new(0.0, 1.0)
            }
            .constrained_dof(),
            5
        );
        assert_eq!(JointKind::BallAndSocket.to_string(), "ball_and_socket");
    }

    #[test]
    fn frame_orthonormalizes_perpendicular() {
        let frame = JointFrame::new(
            Point3::origin(),
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
        )
        .unwrap();
        assert_relative_eq!(frame.axis, Vector3::x());
        assert_relative_eq!(frame.perpendicular_axis, Vector3::y(), epsilon = 1e-12);
        assert!(frame.is_orthonormal(1e-12));
    }

    #[test]
    fn frame_rejects_degenerate_axes() {
        assert!(JointFrame::new(Point3::origin(), Vector3::zeros(), Vector3::y()).is_err());
        assert!(JointFrame::new(Point3::origin(), Vector3::x(), Vector3::x() * 3.0).is_err());
    }

    #[test]
    fn frame_from_pose() {
        let pose = Pose::from_position_rotation(
            Point3::new(1.0, 0.0, 0.0),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2),
        );
        let frame = JointFrame::from_pose(&pose);
        assert_relative_eq!(frame.axis, Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(frame.perpendicular_axis, -Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn ragdoll_pair_carries_limits() {
        let limits = RagdollLimits::default();
        let joints = ragdoll_pair(
            BodyId::new(3),
            BodyId::new(4),
            JointFrame::at(Point3::new(0.5, 0.0, 0.0)),
            JointFrame::identity(),
            &limits,
        );

        for joint in &joints {
            assert_eq!(joint.body_a, BodyId::new(3));
            assert_eq!(joint.body_b, Some(BodyId::new(4)));
            assert_relative_eq!(joint.frame_a.position.x, 0.5);
            assert!(!joint.is_world_anchored());
        }

        let JointKind::ConeTwist { max_cone, twist } = joints[0].kind else {
            panic!("expected cone twist");
        };
        assert_relative_eq!(max_cone, FRAC_PI_2);
        assert_relative_eq!(twist.upper(), FRAC_PI_2);

        let JointKind::PerpendicularCone { limits } = joints[1].kind else {
            panic!("expected perpendicular cone");
        };
        assert_relative_eq!(limits.lower(), -PI / 16.0);
    }

    #[test]
    fn anchor_pins_to_world() {
        let joint = anchor(BodyId::new(0), Point3::origin(), Point3::new(0.0, 1.0, 0.0));
        assert!(joint.is_world_anchored());
        assert!(joint.involves(BodyId::new(0)));
        assert_eq!(joint.kind, JointKind::BallAndSocket);
        assert_relative_eq!(joint.frame_b.position, Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn prismatic_axis_and_travel() {
        let a = Point3::new(1.0, 0.0, 0.0);
        let b = Point3::new(1.0, 3.0, 4.0);
        let joint = prismatic_between(BodyId::new(7), a, b).unwrap();

        assert_relative_eq!(joint.frame_a.axis, Vector3::new(0.0, 0.6, 0.8), epsilon = 1e-12);
        assert_relative_eq!(joint.frame_b.axis, joint.frame_a.axis);
        assert_relative_eq!(joint.frame_b.position, a);
        assert_relative_eq!(joint.frame_a.position, Point3::origin());
        assert!(joint.frame_a.is_orthonormal(1e-12));

        let JointKind::Prismatic { limits } = joint.kind else {
            panic!("expected prismatic");
        };
        assert_relative_eq!(limits.lower(), 0.0);
        assert_relative_eq!(limits.upper(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn prismatic_rejects_coincident_points() {
        let p = Point3::new(2.0, 2.0, 2.0);
        assert!(prismatic_between(BodyId::new(0), p, p).unwrap_err().is_degenerate_axis());
    }
}
