//! One-shot rope generation.

use curve_types::Curve;
use mesh_from_curves::generate_rope_mesh;
use mesh_types::MeshBuffers;
use nalgebra::Point3;
use sim_deformable::{CapsuleChain, SkinBinding, bind, build_chain};
use tracing::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Result, RigError, RopeConfig};

/// Everything generated for one rope.
///
/// The mesh and chain are in world space; the skin is in curve-local space
/// with its origin at [`origin`](Self::origin).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RopeAsset {
    /// Tube render mesh.
    pub mesh: MeshBuffers,
    /// Bones and vertex weights for the tube.
    pub skin: SkinBinding,
    /// Rigid bodies and joints for the physics engine.
    pub chain: CapsuleChain,
    /// World position of the curve start.
    pub origin: Point3<f64>,
}

impl RopeAsset {
    /// Mesh positions relative to [`origin`](Self::origin), ready for
    /// [`SkinBinding::deform`].
    #[must_use]
    pub fn bind_vertices(&self) -> Vec<Point3<f64>> {
        self.mesh
            .positions
            .iter()
            .map(|p| Point3::from(p - self.origin))
            .collect()
    }
}

/// Mesh positions relative to the start of `curve`.
#[must_use]
pub fn curve_local_positions<C: Curve + ?Sized>(mesh: &MeshBuffers, curve: &C) -> Vec<Point3<f64>> {
    let origin = curve.start();
    mesh.positions.iter().map(|p| Point3::from(p - origin)).collect()
}

/// Generate the mesh, skin and chain of a rope along `curve`.
///
/// All three stages sample the same curve with the same segment count, so
/// the tube has `2·S` rings, the skin `S - 1` bones and the chain `S - 1`
/// bodies. Generation is all or nothing.
///
/// # Errors
///
/// - [`RigError::Mesh`] with an invalid-topology cause if
///   `segment_count < 2` or `vertices_per_ring < 3`.
/// - A degenerate-curve error (see [`RigError::is_degenerate_curve`]) if the
///   curve or one of its segments has zero length.
/// - Any other configuration error from [`RopeConfig::validate`].
///
/// # Example
///
/// ```
/// use rope_rig::{CurveSpec, RopeConfig, generate};
/// use nalgebra::Point3;
///
/// let curve = CurveSpec::segment(Point3::origin(), Point3::new(0.0, 1.0, 0.0));
/// let asset = generate(&curve, &RopeConfig::default()).unwrap();
///
/// assert_eq!(asset.mesh.vertex_count(), 40);
/// assert_eq!(asset.skin.bone_count(), 3);
/// assert_eq!(asset.chain.inter_segment_joints().len(), 4);
/// assert_eq!(asset.chain.anchor_joints().len(), 2);
/// ```
pub fn generate<C: Curve + ?Sized>(curve: &C, config: &RopeConfig) -> Result<RopeAsset> {
    generate_stages(curve, config).inspect_err(|err| {
        warn!(
            error = %err,
            degenerate_curve = err.is_degenerate_curve(),
            "Rope generation aborted"
        );
    })
}

fn generate_stages<C: Curve + ?Sized>(curve: &C, config: &RopeConfig) -> Result<RopeAsset> {
    config.validate()?;
    curve.validate()?;

    let segment_count = config.segment_count();
    let vertices_per_ring = config.mesh.vertices_per_ring;
    debug!(
        segment_count,
        vertices_per_ring,
        curve_segments = curve.segment_count(),
        "Generating rope"
    );

    let mesh = generate_rope_mesh(curve, &config.mesh)?;
    let skin = bind(curve, segment_count, vertices_per_ring, &config.skin)?;
    let chain = build_chain(curve, segment_count, &config.chain)?;

    if skin.vertex_count() != mesh.vertex_count() || skin.bone_count() != chain.len() {
        return Err(RigError::inconsistent_config(format!(
            "skin covers {} vertices and {} bones, mesh has {} vertices, chain has {} bodies",
            skin.vertex_count(),
            skin.bone_count(),
            mesh.vertex_count(),
            chain.len()
        )));
    }

    info!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        bones = skin.bone_count(),
        joints = chain.joints().len(),
        "Generated rope"
    );

    Ok(RopeAsset {
        mesh,
        skin,
        chain,
        origin: curve.start(),
    })
}
