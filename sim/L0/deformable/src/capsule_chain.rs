//! Rigid capsule chains for ropes.
//!
//! A rope of `S` segments becomes `B = S - 1` rigid bodies, one per bone,
//! each carrying a capsule collider along its local `+X` (the curve tangent).
//! Body `i` sits at arc length `i·L/B`, so its distal end touches the next
//! body's origin:
//!
//! ```text
//!  start                                         end
//!   ◉──[ body 0 ]──○──[ body 1 ]──○──[ body 2 ]──◉
//!   ▲              ▲              ▲              ▲
//!  anchor       ragdoll        ragdoll        anchor
//!               pair           pair
//! ```
//!
//! Consecutive bodies are joined by a [`ragdoll_pair`]; the two chain ends are
//! pinned to the curve's end points by ball-and-socket [`anchor`]s. All poses
//! are in world space.

use curve_types::{Curve, frame_at_distance};
use nalgebra::{Point3, Vector3};
use sim_constraint::{JointFrame, JointSpec, RagdollLimits, anchor, ragdoll_pair};
use sim_types::{BodyId, MassProperties, Pose};
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{DeformableError, Result, require_count};

/// Configuration for a capsule chain.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CapsuleChainConfig {
    /// Radius of each capsule collider.
    pub radius: f64,
    /// Gap subtracted from each collider length so neighbors do not overlap.
    pub clearance: f64,
    /// Mass per unit length (kg/m).
    pub linear_density: f64,
    /// Linear velocity damping.
    pub linear_damping: f64,
    /// Angular velocity damping.
    pub angular_damping: f64,
    /// Limits of the joints between consecutive bodies.
    pub ragdoll: RagdollLimits,
    /// Reference up for body orientation.
    pub world_up: Vector3<f64>,
}

impl Default for CapsuleChainConfig {
    fn default() -> Self {
        Self {
            radius: 0.05,
            clearance: 0.01,
            linear_density: 1.0,
            linear_damping: 0.05,
            angular_damping: 0.05,
            ragdoll: RagdollLimits::default(),
            world_up: Vector3::z(),
        }
    }
}

impl CapsuleChainConfig {
    /// Create a config for a rope of the given collider radius.
    #[must_use]
    pub fn rope(radius: f64) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    /// Set the collider radius.
    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Set the gap between neighboring colliders.
    #[must_use]
    pub fn with_clearance(mut self, clearance: f64) -> Self {
        self.clearance = clearance;
        self
    }

    /// Set the mass per unit length.
    #[must_use]
    pub fn with_linear_density(mut self, linear_density: f64) -> Self {
        self.linear_density = linear_density;
        self
    }

    /// Set linear and angular damping.
    #[must_use]
    pub fn with_damping(mut self, linear: f64, angular: f64) -> Self {
        self.linear_damping = linear;
        self.angular_damping = angular;
        self
    }

    /// Set the ragdoll joint limits.
    #[must_use]
    pub fn with_ragdoll(mut self, ragdoll: RagdollLimits) -> Self {
        self.ragdoll = ragdoll;
        self
    }

    /// Set the world up vector.
    #[must_use]
    pub fn with_world_up(mut self, world_up: Vector3<f64>) -> Self {
        self.world_up = world_up;
        self
    }

    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// - [`DeformableError::InvalidConfig`] for a non-positive radius, a
    ///   negative clearance, density or damping, or a zero `world_up`.
    /// - [`DeformableError::Constraint`] for invalid ragdoll limits.
    pub fn validate(&self) -> Result<()> {
        if !(self.radius > 0.0 && self.radius.is_finite()) {
            return Err(DeformableError::invalid_config("radius must be positive"));
        }
        for (name, value) in [
            ("clearance", self.clearance),
            ("linear_density", self.linear_density),
            ("linear_damping", self.linear_damping),
            ("angular_damping", self.angular_damping),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(DeformableError::invalid_config(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        let up = self.world_up.norm();
        if !(up > 0.0 && up.is_finite()) {
            return Err(DeformableError::invalid_config("world_up must be a non-zero vector"));
        }
        self.ragdoll.validate()?;
        Ok(())
    }
}

/// A capsule collider lying along a body's local `+X`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Capsule {
    /// Radius.
    pub radius: f64,
    /// Length of the cylinder part between the hemisphere centers.
    pub length: f64,
    /// Collider center in body-local space.
    pub center: Point3<f64>,
}

impl Capsule {
    /// Enclosed volume.
    #[must_use]
    pub fn volume(&self) -> f64 {
        let r2 = self.radius * self.radius;
        std::f64::consts::PI * r2 * (self.length + 4.0 / 3.0 * self.radius)
    }
}

/// One rigid body of a capsule chain.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChainSegment {
    /// Position along the chain.
    pub index: usize,
    /// Body handle used by the joints.
    pub body: BodyId,
    /// World pose of the body's proximal end, forward along the tangent.
    pub rest_pose: Pose,
    /// Collision shape.
    pub collider: Capsule,
    /// Mass and inertia.
    pub mass: MassProperties,
    /// Linear velocity damping.
    pub linear_damping: f64,
    /// Angular velocity damping.
    pub angular_damping: f64,
}

impl ChainSegment {
    /// World position of the segment's far end.
    #[must_use]
    pub fn distal_point(&self, link_length: f64) -> Point3<f64> {
        self.rest_pose.advanced(link_length).position
    }
}

/// Bodies and joints of a rope ready to hand to a physics engine.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CapsuleChain {
    segments: Vec<ChainSegment>,
    joints: Vec<JointSpec>,
    link_length: f64,
}

impl CapsuleChain {
    /// The rigid bodies, start to end.
    #[must_use]
    pub fn segments(&self) -> &[ChainSegment] {
        &self.segments
    }

    /// All joints: inter-segment pairs first, then the two anchors.
    #[must_use]
    pub fn joints(&self) -> &[JointSpec] {
        &self.joints
    }

    /// Ragdoll joints between consecutive segments, two per pair.
    #[must_use]
    pub fn inter_segment_joints(&self) -> &[JointSpec] {
        let split = self.joints.len().saturating_sub(2);
        &self.joints[..split]
    }

    /// The start and end anchors.
    #[must_use]
    pub fn anchor_joints(&self) -> &[JointSpec] {
        let split = self.joints.len().saturating_sub(2);
        &self.joints[split..]
    }

    /// Distance between consecutive body origins.
    #[must_use]
    pub fn link_length(&self) -> f64 {
        self.link_length
    }

    /// Number of bodies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the chain has no bodies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total mass of all bodies.
    #[must_use]
    pub fn total_mass(&self) -> f64 {
        self.segments.iter().map(|s| s.mass.mass).sum()
    }

    /// Check every body's pose and mass.
    ///
    /// # Errors
    ///
    /// Returns [`DeformableError::Body`] for the first body with a
    /// non-finite pose or invalid mass properties.
    pub fn validate(&self) -> Result<()> {
        for segment in &self.segments {
            segment.rest_pose.validate_for(segment.body)?;
            segment.mass.validate()?;
        }
        Ok(())
    }
}

/// Build the capsule chain for a rope of `segment_count` segments over `curve`.
///
/// Each collider is `L / segment_count - clearance` long (never negative)
/// while bodies are spaced `L / (segment_count - 1)` apart, so the chain's
/// first body starts at `curve.start()` and its last ends at `curve.end()`.
///
/// # Errors
///
/// - [`DeformableError::InvalidTopology`] if `segment_count < 2`.
/// - [`DeformableError::InvalidConfig`] if `config` is invalid.
/// - [`DeformableError::Curve`] if the curve is degenerate.
///
/// # Example
///
/// ```
/// use curve_types::LineSegment;
/// use sim_deformable::{CapsuleChainConfig, build_chain};
/// use nalgebra::Point3;
///
/// let curve = LineSegment::new(Point3::origin(), Point3::new(0.0, 3.0, 0.0));
/// let chain = build_chain(&curve, 4, &CapsuleChainConfig::default()).unwrap();
///
/// assert_eq!(chain.len(), 3);
/// assert_eq!(chain.inter_segment_joints().len(), 4);
/// assert_eq!(chain.anchor_joints().len(), 2);
/// ```
pub fn build_chain<C: Curve + ?Sized>(
    curve: &C,
    segment_count: usize,
    config: &CapsuleChainConfig,
) -> Result<CapsuleChain> {
    require_count("segment_count", segment_count, 2)?;
    config.validate()?;
    curve.validate()?;

    let body_count = segment_count - 1;
    let length = curve.arc_length();
    let link_length = length / body_count as f64;
    let collider_length = (length / segment_count as f64 - config.clearance).max(0.0);

    let collider = Capsule {
        radius: config.radius,
        length: collider_length,
        center: Point3::new(link_length * 0.5, 0.0, 0.0),
    };
    let mut mass = MassProperties::capsule(
        config.linear_density * link_length,
        config.radius,
        collider_length,
    );
    mass.center_of_mass = collider.center.coords;

    let segments = (0..body_count)
        .map(|i| {
            let frame = frame_at_distance(curve, link_length * i as f64, &config.world_up)?;
            Ok(ChainSegment {
                index: i,
                body: BodyId::new(i as u64),
                rest_pose: Pose::from_position_rotation(frame.position, frame.to_rotation()),
                collider,
                mass,
                linear_damping: config.linear_damping,
                angular_damping: config.angular_damping,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let distal = JointFrame::at(Point3::new(link_length, 0.0, 0.0));
    let mut joints: Vec<JointSpec> = segments
        .windows(2)
        .flat_map(|pair| {
            ragdoll_pair(pair[0].body, pair[1].body, distal, JointFrame::identity(), &config.ragdoll)
        })
        .collect();

    let last = BodyId::new((body_count - 1) as u64);
    joints.push(anchor(BodyId::new(0), Point3::origin(), curve.start()));
    joints.push(anchor(last, distal.position, curve.end()));

    debug!(link_length, collider_length, "Chain geometry");
    info!(
        bodies = segments.len(),
        joints = joints.len(),
        length,
        "Built capsule chain"
    );

    let chain = CapsuleChain {
        segments,
        joints,
        link_length,
    };
    chain.validate()?;
    Ok(chain)
}
