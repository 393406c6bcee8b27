//! Rope tube generation.

use curve_types::Curve;
use mesh_types::MeshBuffers;
use nalgebra::{Vector2, Vector3};
use tracing::{debug, info};

use crate::RopeMeshConfig;
use crate::error::GenerateResult;
use crate::indices::build_indices;
use crate::rings::{ring_positions, ring_specs};

/// Generate a capped rope tube around `curve`.
///
/// Produces `2 * segment_count` rings of `vertices_per_ring` vertices each.
/// Normals are recomputed from the triangles (area-weighted); uvs are
/// `u = j / vertices_per_ring` around the ring and
/// `v = ring / (ring_count - 1)` along the rope.
///
/// # Errors
///
/// - [`GenerateError::InvalidTopology`](crate::GenerateError::InvalidTopology)
///   if `segment_count < 2` or `vertices_per_ring < 3`.
/// - [`GenerateError::Curve`](crate::GenerateError::Curve) if the curve has a
///   zero-length segment. No buffers are produced.
///
/// # Example
///
/// ```
/// use curve_types::LineSegment;
/// use mesh_from_curves::{RopeMeshConfig, generate_rope_mesh};
/// use nalgebra::Point3;
///
/// let curve = LineSegment::new(Point3::origin(), Point3::new(0.0, 1.0, 0.0));
/// let mesh = generate_rope_mesh(&curve, &RopeMeshConfig::default()).unwrap();
///
/// assert_eq!(mesh.vertex_count(), 40);
/// assert_eq!(mesh.flat_indices().len(), 234);
/// ```
pub fn generate_rope_mesh<C: Curve + ?Sized>(
    curve: &C,
    config: &RopeMeshConfig,
) -> GenerateResult<MeshBuffers> {
    let specs = ring_specs(curve, config)?;
    let ring_count = specs.len();
    let vpr = config.vertices_per_ring;

    debug!(ring_count, vertices_per_ring = vpr, "Placing rope rings");

    let positions = ring_positions(&specs, vpr);
    let uvs = (0..ring_count)
        .flat_map(|ring| {
            let v = ring as f64 / (ring_count - 1) as f64;
            (0..vpr).map(move |j| Vector2::new(j as f64 / vpr as f64, v))
        })
        .collect();

    let mut mesh = MeshBuffers {
        normals: vec![Vector3::zeros(); positions.len()],
        positions,
        uvs,
        indices: build_indices(ring_count, vpr),
    };
    mesh.recompute_normals();
    mesh.validate()?;

    info!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "Generated rope mesh"
    );

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use curve_types::{LineSegment, Spline};
    use nalgebra::Point3;

    fn straight() -> LineSegment {
        LineSegment::new(Point3::origin(), Point3::new(0.0, 1.0, 0.0))
    }

    #[test]
    fn straight_rope_counts() {
        let mesh = generate_rope_mesh(&straight(), &RopeMeshConfig::default()).unwrap();
        assert_eq!(mesh.vertex_count(), 40);
        assert_eq!(mesh.normals.len(), 40);
        assert_eq!(mesh.uvs.len(), 40);
        assert_eq!(mesh.triangle_count(), 78);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn closed_tube_has_positive_volume() {
        let mesh = generate_rope_mesh(&straight(), &RopeMeshConfig::default()).unwrap();
        assert!(mesh.signed_volume() > 0.0);
    }

    #[test]
    fn wall_faces_point_away_from_axis() {
        let config = RopeMeshConfig::default().with_vertices_per_ring(8);
        let mesh = generate_rope_mesh(&straight(), &config).unwrap();
        let wall_triangles = (config.ring_count() - 1) * 8 * 2;

        for i in 0..wall_triangles {
            let tri = mesh.triangle(i).unwrap();
            let Some(normal) = tri.normal() else { continue };
            let c = tri.centroid();
            let radial = Vector3::new(c.x, 0.0, c.z);
            assert!(normal.dot(&radial) > 0.0, "triangle {i} faces inward");
        }
    }

    #[test]
    fn cap_faces_point_out_of_the_ends() {
        let mesh = generate_rope_mesh(&straight(), &RopeMeshConfig::default()).unwrap();
        let wall = 7 * 5 * 2;
        // Skip the degenerate first triangle of each fan.
        for i in wall + 1..wall + 4 {
            assert!(mesh.face_normal(i).unwrap().y < -0.99);
        }
        for i in wall + 5..wall + 8 {
            assert!(mesh.face_normal(i).unwrap().y > 0.99);
        }
    }

    #[test]
    fn uv_layout() {
        let mesh = generate_rope_mesh(&straight(), &RopeMeshConfig::default()).unwrap();
        assert_relative_eq!(mesh.uvs[0], Vector2::new(0.0, 0.0));
        assert_relative_eq!(mesh.uvs[3], Vector2::new(0.6, 0.0));
        assert_relative_eq!(mesh.uvs[39], Vector2::new(0.8, 1.0));
        assert_relative_eq!(mesh.uvs[5].y, 1.0 / 7.0);
    }

    #[test]
    fn spline_rope_is_valid() {
        let spline = Spline::catmull_rom(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, -0.5),
                Point3::new(2.0, 1.0, -0.5),
            ],
            false,
        )
        .unwrap();
        let config = RopeMeshConfig::default().with_segment_count(10);
        let mesh = generate_rope_mesh(&spline, &config).unwrap();
        assert_eq!(mesh.vertex_count(), 100);
        assert!(mesh.validate().is_ok());
        assert!(mesh.normals.iter().all(|n| (n.norm() - 1.0).abs() < 1e-9));
    }

    #[test]
    fn vertical_rope_recovers_frame() {
        let up = LineSegment::new(Point3::origin(), Point3::new(0.0, 0.0, 2.0));
        let mesh = generate_rope_mesh(&up, &RopeMeshConfig::default()).unwrap();
        assert!(mesh.signed_volume() > 0.0);
    }

    #[test]
    fn regeneration_is_bit_identical() {
        let config = RopeMeshConfig::default().with_segment_count(6);
        let a = generate_rope_mesh(&straight(), &config).unwrap();
        let b = generate_rope_mesh(&straight(), &config).unwrap();
        assert_eq!(a, b);
    }
}
