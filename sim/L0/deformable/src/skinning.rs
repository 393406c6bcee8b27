//! Rigid single-bone skinning for rope tubes.
//!
//! A rope of `S` segments gets `S - 1` bones spread evenly by arc length.
//! Each tube ring maps to one bone, every vertex of the ring with weight 1:
//!
//! ```text
//! ring:  0  1  2  3  4  5  6  7        (S = 4, two rings per bone)
//! bone:  0  0  0  1  1  2  2  2
//! ```
//!
//! Skinning a vertex moves it rigidly with its bone:
//!
//! ```text
//! v' = M_bone · M_bind⁻¹ · v
//! ```
//!
//! Bone rest poses and bind vertices live in curve-local space: the world
//! position of the curve start is subtracted, so the binding does not depend
//! on where the rope is placed.

use curve_types::{Curve, frame_at_distance};
use nalgebra::{Point3, Vector3};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{DeformableError, Result, require_count};

use sim_types::Pose;

/// Tolerance for a vertex's weights summing to one.
const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Skin binding parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkinConfig {
    /// Consecutive tube rings driven by one bone.
    pub rings_per_bone: usize,
    /// Reference up for bone orientation.
    pub world_up: Vector3<f64>,
}

impl Default for SkinConfig {
    fn default() -> Self {
        Self {
            rings_per_bone: 2,
            world_up: Vector3::z(),
        }
    }
}

impl SkinConfig {
    /// Set the rings per bone.
    #[must_use]
    pub fn with_rings_per_bone(mut self, rings_per_bone: usize) -> Self {
        self.rings_per_bone = rings_per_bone;
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
    /// - [`DeformableError::InvalidTopology`] if `rings_per_bone` is zero.
    /// - [`DeformableError::InvalidConfig`] if `world_up` is zero or not finite.
    pub fn validate(&self) -> Result<()> {
        require_count("rings_per_bone", self.rings_per_bone, 1)?;
        let up = self.world_up.norm();
        if !(up.is_finite() && up > 0.0) {
            return Err(DeformableError::invalid_config("world_up must be a non-zero vector"));
        }
        Ok(())
    }
}

/// A bone of a rope skeleton.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bone {
    /// Position in the bone sequence.
    pub index: usize,
    /// Rest pose in curve-local space, forward along the curve tangent.
    pub rest_pose: Pose,
    /// Inverse of `rest_pose`.
    pub inverse_bind_pose: Pose,
}

impl Bone {
    /// Create a bone resting at `rest_pose`.
    #[must_use]
    pub fn new(index: usize, rest_pose: Pose) -> Self {
        Self {
            index,
            rest_pose,
            inverse_bind_pose: rest_pose.inverse(),
        }
    }

    /// Transform taking bind-space vertices to where `current` puts them.
    #[must_use]
    pub fn skinning_transform(&self, current: &Pose) -> Pose {
        current.compose(&self.inverse_bind_pose)
    }
}

/// Influence of one bone on one vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexWeight {
    /// Index into the vertex buffer.
    pub vertex_index: usize,
    /// Index of the influencing bone.
    pub bone_index: usize,
    /// Influence, `1.0` for rigid binding.
    pub weight: f64,
}

/// Bones and per-vertex weights for one rope mesh.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkinBinding {
    bones: Vec<Bone>,
    weights: Vec<VertexWeight>,
    vertex_count: usize,
}

/// Bone driving ring `ring_index`.
///
/// `clamp((ring_index - 1) / rings_per_bone, 0, bone_count - 1)`; ring 0 and
/// anything past the last bone clamp to the ends.
#[must_use]
pub fn bone_for_ring(ring_index: usize, rings_per_bone: usize, bone_count: usize) -> usize {
    (ring_index.saturating_sub(1) / rings_per_bone.max(1)).min(bone_count.saturating_sub(1))
}

/// Bind a rope tube over `curve` to a skeleton of `segment_count - 1` bones.
///
/// Bone `i` rests at arc-length fraction `i / bone_count`, looking along the
/// tangent there. The tube is assumed to be ring-major with
/// `2 * segment_count` rings of `vertices_per_ring` vertices.
///
/// # Errors
///
/// - [`DeformableError::InvalidTopology`] if `segment_count < 2` or
///   `vertices_per_ring < 3`.
/// - [`DeformableError::Curve`] if the curve is degenerate.
///
/// # Example
///
/// ```
/// use curve_types::LineSegment;
/// use sim_deformable::{SkinConfig, bind};
/// use nalgebra::Point3;
///
/// let curve = LineSegment::new(Point3::origin(), Point3::new(0.0, 1.0, 0.0));
/// let skin = bind(&curve, 4, 5, &SkinConfig::default()).unwrap();
///
/// assert_eq!(skin.bone_count(), 3);
/// assert_eq!(skin.weights().len(), 40);
/// ```
pub fn bind<C: Curve + ?Sized>(
    curve: &C,
    segment_count: usize,
    vertices_per_ring: usize,
    config: &SkinConfig,
) -> Result<SkinBinding> {
    require_count("segment_count", segment_count, 2)?;
    require_count("vertices_per_ring", vertices_per_ring, 3)?;
    config.validate()?;
    curve.validate()?;

    let bone_count = segment_count - 1;
    let length = curve.arc_length();
    let origin = curve.start();

    let bones = (0..bone_count)
        .map(|i| {
            let frame = frame_at_distance(curve, length * i as f64 / bone_count as f64, &config.world_up)?;
            let rest_pose = Pose::from_position_rotation(
                Point3::from(frame.position - origin),
                frame.to_rotation(),
            );
            Ok(Bone::new(i, rest_pose))
        })
        .collect::<Result<Vec<_>>>()?;

    let ring_count = segment_count * 2;
    let weights = (0..ring_count)
        .flat_map(|ring| {
            let bone_index = bone_for_ring(ring, config.rings_per_bone, bone_count);
            (0..vertices_per_ring).map(move |k| VertexWeight {
                vertex_index: ring * vertices_per_ring + k,
                bone_index,
                weight: 1.0,
            })
        })
        .collect();

    debug!(bone_count, ring_count, length, "Bound rope skin");

    Ok(SkinBinding {
        bones,
        weights,
        vertex_count: ring_count * vertices_per_ring,
    })
}

impl SkinBinding {
    /// The bones, in chain order.
    #[must_use]
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    /// Number of bones.
    #[must_use]
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// Number of bound vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// All vertex weights, ordered by vertex.
    #[must_use]
    pub fn weights(&self) -> &[VertexWeight] {
        &self.weights
    }

    /// Inverse bind pose of every bone.
    #[must_use]
    pub fn bind_poses(&self) -> Vec<Pose> {
        self.bones.iter().map(|b| b.inverse_bind_pose).collect()
    }

    /// Rest pose of every bone, usable as the identity deformation.
    #[must_use]
    pub fn rest_poses(&self) -> Vec<Pose> {
        self.bones.iter().map(|b| b.rest_pose).collect()
    }

    /// Bone index of each vertex.
    #[must_use]
    pub fn bone_indices(&self) -> Vec<usize> {
        let mut indices = vec![0; self.vertex_count];
        for w in &self.weights {
            if let Some(slot) = indices.get_mut(w.vertex_index) {
                *slot = w.bone_index;
            }
        }
        indices
    }

    /// Check bone references and weight sums.
    ///
    /// # Errors
    ///
    /// - [`DeformableError::IndexOutOfBounds`] if a weight names a missing
    ///   bone or vertex.
    /// - [`DeformableError::InvalidConfig`] if some vertex's weights do not
    ///   sum to one.
    pub fn validate(&self) -> Result<()> {
        let mut sums = vec![0.0; self.vertex_count];
        for w in &self.weights {
            if w.bone_index >= self.bones.len() {
                return Err(DeformableError::index_out_of_bounds(format!(
                    "Vertex {} references bone {} but skeleton only has {} bones",
                    w.vertex_index,
                    w.bone_index,
                    self.bones.len()
                )));
            }
            let Some(sum) = sums.get_mut(w.vertex_index) else {
                return Err(DeformableError::index_out_of_bounds(format!(
                    "Weight references vertex {} but binding has {} vertices",
                    w.vertex_index, self.vertex_count
                )));
            };
            *sum += w.weight;
        }

        if let Some((i, sum)) = sums
            .iter()
            .enumerate()
            .find(|(_, s)| (**s - 1.0).abs() > WEIGHT_TOLERANCE)
        {
            return Err(DeformableError::invalid_config(format!(
                "Vertex {i} weights not normalized (sum: {sum})"
            )));
        }
        Ok(())
    }

    /// Skin `bind_vertices` (curve-local) with the current `bone_poses`.
    ///
    /// # Errors
    ///
    /// Returns [`DeformableError::IndexOutOfBounds`] if either slice has the
    /// wrong length.
    pub fn deform(&self, bind_vertices: &[Point3<f64>], bone_poses: &[Pose]) -> Result<Vec<Point3<f64>>> {
        if bind_vertices.len() != self.vertex_count {
            return Err(DeformableError::index_out_of_bounds(format!(
                "Expected {} bind vertices, got {}",
                self.vertex_count,
                bind_vertices.len()
            )));
        }
        if bone_poses.len() != self.bones.len() {
            return Err(DeformableError::index_out_of_bounds(format!(
                "Expected {} bone poses, got {}",
                self.bones.len(),
                bone_poses.len()
            )));
        }

        let transforms: Vec<Pose> = self
            .bones
            .iter()
            .zip(bone_poses)
            .map(|(bone, pose)| bone.skinning_transform(pose))
            .collect();

        let mut skinned = vec![Vector3::zeros(); bind_vertices.len()];
        for w in &self.weights {
            let (Some(transform), Some(vertex)) =
                (transforms.get(w.bone_index), bind_vertices.get(w.vertex_index))
            else {
                continue;
            };
            skinned[w.vertex_index] += transform.transform_point(vertex).coords * w.weight;
        }

        Ok(skinned.into_iter().map(Point3::from).collect())
    }
}
