//! Rope rig configuration.

use mesh_from_curves::RopeMeshConfig;
use nalgebra::Vector3;
use sim_deformable::{CapsuleChainConfig, SkinConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Result, RigError};

/// Maximum angle between the sub-configurations' up vectors.
const UP_ALIGNMENT_TOLERANCE: f64 = 1e-9;

/// Settings for every stage of rope generation.
///
/// The segment count lives in [`RopeMeshConfig`]; the skin and chain stages
/// read it from there so all three outputs share one topology.
///
/// # Example
///
/// ```
/// use rope_rig::RopeConfig;
///
/// let config = RopeConfig::default()
///     .with_segment_count(8)
///     .with_vertices_per_ring(6)
///     .with_radius(0.2);
///
/// assert_eq!(config.bone_count(), 7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RopeConfig {
    /// Tube mesh settings.
    pub mesh: RopeMeshConfig,
    /// Skin binding settings.
    pub skin: SkinConfig,
    /// Physics chain settings.
    pub chain: CapsuleChainConfig,
}

impl RopeConfig {
    /// Set the number of rope segments.
    #[must_use]
    pub fn with_segment_count(mut self, segment_count: usize) -> Self {
        self.mesh.segment_count = segment_count;
        self
    }

    /// Set the number of vertices around each ring.
    #[must_use]
    pub fn with_vertices_per_ring(mut self, vertices_per_ring: usize) -> Self {
        self.mesh.vertices_per_ring = vertices_per_ring;
        self
    }

    /// Set the visual middle radius and the collider radius together.
    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.mesh.middle_radius = radius;
        self.chain.radius = radius;
        self
    }

    /// Set the world up vector of every stage.
    #[must_use]
    pub fn with_world_up(mut self, world_up: Vector3<f64>) -> Self {
        self.mesh.world_up = world_up;
        self.skin.world_up = world_up;
        self.chain.world_up = world_up;
        self
    }

    /// Replace the mesh settings.
    #[must_use]
    pub fn with_mesh(mut self, mesh: RopeMeshConfig) -> Self {
        self.mesh = mesh;
        self
    }

    /// Replace the skin settings.
    #[must_use]
    pub fn with_skin(mut self, skin: SkinConfig) -> Self {
        self.skin = skin;
        self
    }

    /// Replace the chain settings.
    #[must_use]
    pub fn with_chain(mut self, chain: CapsuleChainConfig) -> Self {
        self.chain = chain;
        self
    }

    /// Number of rope segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.mesh.segment_count
    }

    /// Number of bones and chain bodies.
    #[must_use]
    pub fn bone_count(&self) -> usize {
        self.mesh.segment_count.saturating_sub(1)
    }

    /// Check every stage and their agreement.
    ///
    /// # Errors
    ///
    /// - [`RigError::Mesh`] if the mesh settings are invalid, including a
    ///   segment count below 2 or fewer than 3 vertices per ring.
    /// - [`RigError::Rig`] if the skin or chain settings are invalid.
    /// - [`RigError::InconsistentConfig`] if the stages use different up
    ///   directions, which would twist bones against their rings.
    pub fn validate(&self) -> Result<()> {
        self.mesh.validate()?;
        self.skin.validate()?;
        self.chain.validate()?;

        let up = self.mesh.world_up.normalize();
        for (stage, other) in [("skin", self.skin.world_up), ("chain", self.chain.world_up)] {
            if (other.normalize() - up).norm() > UP_ALIGNMENT_TOLERANCE {
                return Err(RigError::inconsistent_config(format!(
                    "{stage} world_up {:?} differs from mesh world_up {:?}",
                    other, self.mesh.world_up
                )));
            }
        }
        Ok(())
    }
}
