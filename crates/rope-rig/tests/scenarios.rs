//! End-to-end rope generation scenarios.
//!
//! Run with: cargo test -p rope-rig --test scenarios

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::cast_precision_loss)]

use approx::assert_relative_eq;
use curve_types::{Curve, Knot, Spline};
use mesh_from_curves::{RailConfig, build_rail_mesh, index_count};
use nalgebra::{Point3, Vector3};
use rope_rig::{CurveSpec, RegenerationDecision, RopeConfig, RopeInstance, RopeSnapshot, generate};
use sim_constraint::{JointKind, PathCursor, PathMotor, prismatic_between};
use sim_types::BodyId;

// =============================================================================
// Straight rope
// =============================================================================

mod straight_rope {
    use super::*;

    fn curve() -> CurveSpec {
        CurveSpec::segment(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0))
    }

    #[test]
    fn default_topology() {
        let asset = generate(&curve(), &RopeConfig::default()).unwrap();

        assert_eq!(asset.mesh.vertex_count(), 40);
        assert_eq!(asset.mesh.flat_indices().len(), index_count(8, 5));
        assert_eq!(asset.skin.bone_count(), 3);
        assert_eq!(asset.chain.len(), 3);
        assert_eq!(asset.chain.inter_segment_joints().len(), 4);
        assert_eq!(asset.chain.anchor_joints().len(), 2);
    }

    #[test]
    fn mesh_is_closed_and_outward() {
        let asset = generate(&curve(), &RopeConfig::default()).unwrap();
        assert!(asset.mesh.validate().is_ok());
        assert!(asset.mesh.signed_volume() > 0.0);

        let bounds = asset.mesh.bounds();
        assert_relative_eq!(bounds.min.y, -0.1, epsilon = 1e-9);
        assert_relative_eq!(bounds.max.y, 1.1, epsilon = 1e-9);
    }

    #[test]
    fn anchors_hold_the_ends() {
        let asset = generate(&curve(), &RopeConfig::default()).unwrap();
        let anchors = asset.chain.anchor_joints();

        assert_eq!(anchors[0].frame_b.position, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(anchors[1].frame_b.position, Point3::new(0.0, 1.0, 0.0));
        assert!(anchors.iter().all(|j| j.kind == JointKind::BallAndSocket));
    }
}

// =============================================================================
// Invalid input
// =============================================================================

mod invalid_input {
    use super::*;

    #[test]
    fn too_few_segments_and_vertices() {
        let config = RopeConfig::default().with_vertices_per_ring(3).with_segment_count(1);
        let curve = CurveSpec::segment(Point3::origin(), Point3::new(0.0, 1.0, 0.0));

        let err = generate(&curve, &config).unwrap_err();
        assert!(err.is_invalid_topology());
        assert!(err.is_configuration_error());
    }

    #[test]
    fn start_equals_end() {
        let p = Point3::new(2.0, 2.0, 2.0);
        let err = generate(&CurveSpec::segment(p, p), &RopeConfig::default()).unwrap_err();
        assert!(err.is_degenerate_curve());
        assert!(!err.is_configuration_error());
    }

    #[test]
    fn coincident_spline_knots() {
        let curve = CurveSpec::through(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ])
        .unwrap();
        let err = generate(&curve, &RopeConfig::default()).unwrap_err();
        assert!(err.is_degenerate_curve());
    }
}

// =============================================================================
// Curved rope
// =============================================================================

mod curved_rope {
    use super::*;

    fn sag() -> CurveSpec {
        CurveSpec::through(vec![
            Point3::new(0.0, 0.0, 3.0),
            Point3::new(1.0, 0.0, 2.0),
            Point3::new(2.0, 0.0, 1.8),
            Point3::new(3.0, 0.0, 2.0),
            Point3::new(4.0, 0.0, 3.0),
        ])
        .unwrap()
    }

    #[test]
    fn chain_spans_the_curve() {
        let curve = sag();
        let asset = generate(&curve, &RopeConfig::default().with_segment_count(10)).unwrap();

        let first = &asset.chain.segments()[0];
        assert_relative_eq!(first.rest_pose.position, curve.start(), epsilon = 1e-9);
        assert_eq!(asset.chain.anchor_joints()[1].frame_b.position, curve.end());
        assert_relative_eq!(
            asset.chain.link_length() * asset.chain.len() as f64,
            curve.arc_length(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn bending_a_bone_moves_its_rings() {
        let asset = generate(&sag(), &RopeConfig::default().with_segment_count(6)).unwrap();
        let bind = asset.bind_vertices();

        let mut poses = asset.skin.rest_poses();
        poses[2].position += Vector3::new(0.0, 0.5, 0.0);
        let skinned = asset.skin.deform(&bind, &poses).unwrap();

        let moved = skinned
            .iter()
            .zip(&bind)
            .filter(|(a, b)| (*a - *b).norm() > 1e-9)
            .count();
        assert_eq!(moved, 2 * asset.mesh.vertex_count() / 12);
    }

    #[test]
    fn knots_without_tangents() {
        let spline = Spline::new(
            vec![
                Knot::at(Point3::new(0.0, 0.0, 0.0)),
                Knot::at(Point3::new(1.0, 0.0, 0.0)),
                Knot::at(Point3::new(2.0, 1.0, 0.0)),
            ],
            false,
        )
        .unwrap();
        let curve = CurveSpec::Spline(spline);
        let asset = generate(&curve, &RopeConfig::default().with_segment_count(4)).unwrap();

        assert!(asset.mesh.validate().is_ok());
        assert!(asset.mesh.signed_volume() > 0.0);
        assert_eq!(asset.chain.len(), 4);
        assert_eq!(asset.chain.anchor_joints()[1].frame_b.position, curve.end());
    }
}

// =============================================================================
// Regeneration
// =============================================================================

mod regeneration {
    use super::*;

    #[test]
    fn moving_an_end_point_replaces_the_asset() {
        let mut rope = RopeInstance::new();
        let config = RopeConfig::default();

        let a = RopeSnapshot::new(CurveSpec::segment(Point3::origin(), Point3::new(0.0, 1.0, 0.0)), config.clone());
        let b = RopeSnapshot::new(CurveSpec::segment(Point3::origin(), Point3::new(0.0, 1.5, 0.0)), config);

        assert_eq!(rope.update(a.clone()).unwrap(), RegenerationDecision::Replace);
        let first = rope.asset().cloned().unwrap();
        assert_eq!(rope.update(a).unwrap(), RegenerationDecision::Skip);
        assert_eq!(rope.update(b).unwrap(), RegenerationDecision::Replace);

        let second = rope.asset().unwrap();
        assert_ne!(&first, second);
        assert_eq!(second.chain.anchor_joints()[1].frame_b.position, Point3::new(0.0, 1.5, 0.0));
    }

    #[test]
    fn identical_input_is_bit_identical() {
        let curve = CurveSpec::through(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.5),
            Point3::new(3.0, 0.0, 0.0),
        ])
        .unwrap();
        let config = RopeConfig::default().with_segment_count(7).with_vertices_per_ring(9);

        let a = generate(&curve, &config).unwrap();
        let b = generate(&curve, &config).unwrap();
        assert_eq!(a, b);
    }
}

// =============================================================================
// Rails and paths
// =============================================================================

mod rails_and_paths {
    use super::*;
    use curve_types::Polyline;

    fn track() -> Spline {
        Spline::new(
            vec![
                Knot::at(Point3::new(0.0, 0.0, 0.0)),
                Knot::at(Point3::new(4.0, 0.0, 0.0)),
                Knot::at(Point3::new(4.0, 4.0, 0.0)),
            ],
            false,
        )
        .unwrap()
    }

    #[test]
    fn rail_along_track() {
        let mesh = build_rail_mesh(&track(), &RailConfig::default().with_size(0.2, 0.1).with_corners(0.5, 8)).unwrap();
        assert!(mesh.validate().is_ok());
        assert!(mesh.signed_volume() > 0.0);
    }

    #[test]
    fn cart_steps_along_the_track() {
        let path = Polyline::new(track().knots().iter().map(|k| k.position).collect()).unwrap();
        let cart = BodyId::new(42);

        let first = PathCursor::default().step(cart, &path).unwrap();
        assert_eq!(first.joint, prismatic_between(cart, path.points()[0], path.points()[1]).unwrap());

        assert_eq!(first.next.segment(), 1);

        // Two segments, so the second step wraps.
        let second = first.next.step(cart, &path).unwrap();
        assert_eq!(second.next, PathCursor::default());
    }

    #[test]
    fn motor_ping_pongs_over_the_track() {
        let path = Polyline::new(track().knots().iter().map(|k| k.position).collect()).unwrap();
        let motor = PathMotor::new(0.5);

        assert_relative_eq!(motor.target(&path, 0.0), Point3::new(4.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(motor.target(&path, 1.0), Point3::new(4.0, 4.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(motor.target(&path, 3.0), Point3::new(0.0, 0.0, 0.0), epsilon = 1e-12);
    }
}
