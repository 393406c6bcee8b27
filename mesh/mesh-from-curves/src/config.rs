//! Generation parameters for ropes and rails.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GenerateResult, require_count, require_non_negative, require_positive};

/// Configuration for rope tube generation.
///
/// # Example
///
/// ```
/// use mesh_from_curves::RopeMeshConfig;
///
/// let config = RopeMeshConfig::default()
///     .with_segment_count(8)
///     .with_vertices_per_ring(6);
///
/// assert_eq!(config.ring_count(), 16);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RopeMeshConfig {
    /// Visual segments; the tube gets two rings per segment.
    pub segment_count: usize,
    /// Vertices around each ring.
    pub vertices_per_ring: usize,
    /// Radius of interior rings.
    pub middle_radius: f64,
    /// Radius of the two end rings.
    pub cap_radius: f64,
    /// Offset along the tangent applied to caps and alternating interior rings.
    pub delta_out: f64,
    /// Reference up before the curve's own orientation is applied.
    pub world_up: Vector3<f64>,
}

impl Default for RopeMeshConfig {
    fn default() -> Self {
        Self {
            segment_count: 4,
            vertices_per_ring: 5,
            middle_radius: 0.1,
            cap_radius: 0.05,
            delta_out: 0.1,
            world_up: Vector3::z(),
        }
    }
}

impl RopeMeshConfig {
    /// Set the segment count.
    #[must_use]
    pub fn with_segment_count(mut self, segment_count: usize) -> Self {
        self.segment_count = segment_count;
        self
    }

    /// Set the number of vertices per ring.
    #[must_use]
    pub fn with_vertices_per_ring(mut self, vertices_per_ring: usize) -> Self {
        self.vertices_per_ring = vertices_per_ring;
        self
    }

    /// Set interior and cap radii.
    #[must_use]
    pub fn with_radii(mut self, middle_radius: f64, cap_radius: f64) -> Self {
        self.middle_radius = middle_radius;
        self.cap_radius = cap_radius;
        self
    }

    /// Set the push-out distance.
    #[must_use]
    pub fn with_delta_out(mut self, delta_out: f64) -> Self {
        self.delta_out = delta_out;
        self
    }

    /// Set the world up vector.
    #[must_use]
    pub fn with_world_up(mut self, world_up: Vector3<f64>) -> Self {
        self.world_up = world_up;
        self
    }

    /// Number of rings (`2 * segment_count`).
    #[must_use]
    pub fn ring_count(&self) -> usize {
        self.segment_count * 2
    }

    /// Number of vertices the tube will have.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.ring_count() * self.vertices_per_ring
    }

    /// Check counts and dimensions.
    ///
    /// # Errors
    ///
    /// - [`GenerateError::InvalidTopology`](crate::GenerateError::InvalidTopology)
    ///   if `segment_count < 2` or `vertices_per_ring < 3`.
    /// - [`GenerateError::InvalidDimension`](crate::GenerateError::InvalidDimension)
    ///   for negative or non-finite radii, negative `delta_out`, or a zero
    ///   `world_up`.
    pub fn validate(&self) -> GenerateResult<()> {
        require_count("segment_count", self.segment_count, 2)?;
        require_count("vertices_per_ring", self.vertices_per_ring, 3)?;
        require_non_negative("middle_radius", self.middle_radius)?;
        require_non_negative("cap_radius", self.cap_radius)?;
        require_non_negative("delta_out", self.delta_out)?;
        require_positive("world_up length", self.world_up.norm())?;
        Ok(())
    }
}

/// Configuration for rail generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RailConfig {
    /// Cross-section half-extent along up.
    pub height: f64,
    /// Cross-section half-extent along right.
    pub width: f64,
    /// Distance from each knot at which straight runs end and corners begin.
    pub corner_radius: f64,
    /// Subdivisions of each corner sweep.
    pub corner_segments: usize,
    /// Reference up before knot rotations are applied.
    pub world_up: Vector3<f64>,
}

impl Default for RailConfig {
    fn default() -> Self {
        Self {
            height: 1.0,
            width: 1.0,
            corner_radius: 0.05,
            corner_segments: 8,
            world_up: Vector3::z(),
        }
    }
}

impl RailConfig {
    /// Set the cross-section size.
    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set corner radius and subdivision.
    #[must_use]
    pub fn with_corners(mut self, corner_radius: f64, corner_segments: usize) -> Self {
        self.corner_radius = corner_radius;
        self.corner_segments = corner_segments;
        self
    }

    /// Set the world up vector.
    #[must_use]
    pub fn with_world_up(mut self, world_up: Vector3<f64>) -> Self {
        self.world_up = world_up;
        self
    }

    /// Check counts and dimensions.
    ///
    /// # Errors
    ///
    /// - [`GenerateError::InvalidTopology`](crate::GenerateError::InvalidTopology)
    ///   if `corner_segments < 1`.
    /// - [`GenerateError::InvalidDimension`](crate::GenerateError::InvalidDimension)
    ///   for non-positive width/height, negative corner radius or a zero
    ///   `world_up`.
    pub fn validate(&self) -> GenerateResult<()> {
        require_count("corner_segments", self.corner_segments, 1)?;
        require_positive("width", self.width)?;
        require_positive("height", self.height)?;
        require_non_negative("corner_radius", self.corner_radius)?;
        require_positive("world_up length", self.world_up.norm())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GenerateError;

    #[test]
    fn rope_defaults() {
        let config = RopeMeshConfig::default();
        assert_eq!(config.segment_count, 4);
        assert_eq!(config.vertices_per_ring, 5);
        assert_eq!(config.ring_count(), 8);
        assert_eq!(config.vertex_count(), 40);
        assert_eq!(config.world_up, Vector3::z());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rope_topology_preconditions() {
        let err = RopeMeshConfig::default()
            .with_segment_count(1)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            GenerateError::InvalidTopology {
                parameter: "segment_count",
                ..
            }
        ));

        let err = RopeMeshConfig::default()
            .with_vertices_per_ring(2)
            .validate()
            .unwrap_err();
        assert!(err.is_invalid_topology());
    }

    #[test]
    fn rope_rejects_bad_dimensions() {
        assert!(RopeMeshConfig::default().with_radii(-0.1, 0.05).validate().is_err());
        assert!(RopeMeshConfig::default().with_delta_out(f64::INFINITY).validate().is_err());
        assert!(
            RopeMeshConfig::default()
                .with_world_up(Vector3::zeros())
                .validate()
                .is_err()
        );
    }

    #[test]
    fn rail_defaults_and_validation() {
        let config = RailConfig::default();
        assert_eq!(config.corner_segments, 8);
        assert!(config.validate().is_ok());

        assert!(config.clone().with_corners(0.05, 0).validate().unwrap_err().is_invalid_topology());
        assert!(config.with_size(0.0, 1.0).validate().is_err());
    }
}
