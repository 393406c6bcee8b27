//! Ring layout for rope tubes.
//!
//! A rope with `S` segments has `2S` rings. Rings come in pairs that share a
//! sample point on the curve: the first of each pair is pushed back along the
//! tangent by `delta_out`, the second forward. The outermost pair members are
//! the caps, sampled at the curve ends with the cap radius.
//!
//! ```text
//! ring:   0    1      2    3      4    5   ...  2S-2  2S-1
//! t:      0    0    1/(S-1) 1/(S-1)  ...          1     1
//! push:  -d   +d     -d   +d     -d   +d         -d    +d
//! ```

use std::f64::consts::TAU;

use curve_types::{Curve, Frame, frame_at};
use nalgebra::Point3;
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::RopeMeshConfig;
use crate::error::GenerateResult;

/// One ring of the tube.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RingSpec {
    /// Position in the ring sequence.
    pub ring_index: usize,
    /// Frame at the ring center, already pushed along its tangent.
    pub frame: Frame,
    /// Ring radius.
    pub radius: f64,
    /// Vertices around the ring.
    pub vertex_count: usize,
}

impl RingSpec {
    /// Whether this is the first or last ring.
    #[must_use]
    pub fn is_cap(&self, ring_count: usize) -> bool {
        self.ring_index == 0 || self.ring_index + 1 == ring_count
    }

    /// Position of vertex `k` of this ring.
    ///
    /// Vertices run counter-clockwise around the tangent, starting at `up`.
    #[must_use]
    pub fn vertex(&self, k: usize) -> Point3<f64> {
        let angle = TAU * k as f64 / self.vertex_count as f64;
        self.frame.position
            + (self.frame.up * angle.cos() + self.frame.right * angle.sin()) * self.radius
    }
}

/// Curve parameter sampled by ring `ring_index`.
#[must_use]
pub fn ring_parameter(ring_index: usize, segment_count: usize) -> f64 {
    let ring_count = segment_count * 2;
    if ring_index == 0 {
        0.0
    } else if ring_index + 1 >= ring_count {
        1.0
    } else {
        ((ring_index / 2) as f64 / (segment_count - 1) as f64).min(1.0)
    }
}

/// Lay out all rings of a rope over `curve`.
///
/// # Errors
///
/// - [`GenerateError::InvalidTopology`](crate::GenerateError::InvalidTopology)
///   if the configuration has too few segments or ring vertices.
/// - [`GenerateError::Curve`](crate::GenerateError::Curve) if the curve is
///   degenerate at any sampled point.
pub fn ring_specs<C: Curve + ?Sized>(
    curve: &C,
    config: &RopeMeshConfig,
) -> GenerateResult<Vec<RingSpec>> {
    config.validate()?;
    curve.validate()?;

    let segment_count = config.segment_count;
    let ring_count = config.ring_count();

    // Each pair of rings shares one curve sample.
    let samples = (0..segment_count)
        .map(|pair| frame_at(curve, ring_parameter(pair * 2 + 1, segment_count), &config.world_up))
        .collect::<Result<Vec<_>, _>>()?;

    let specs = (0..ring_count)
        .map(|ring_index| {
            let base = &samples[ring_index / 2];
            let push = if ring_index % 2 == 0 {
                -config.delta_out
            } else {
                config.delta_out
            };
            let radius = if ring_index == 0 || ring_index + 1 == ring_count {
                config.cap_radius
            } else {
                config.middle_radius
            };
            RingSpec {
                ring_index,
                frame: base.pushed(push),
                radius,
                vertex_count: config.vertices_per_ring,
            }
        })
        .collect();

    Ok(specs)
}

/// Flatten rings into one position buffer, ring-major.
///
/// Each ring fills its own `vertices_per_ring` chunk of the output, so rings
/// are placed in parallel.
#[must_use]
pub fn ring_positions(specs: &[RingSpec], vertices_per_ring: usize) -> Vec<Point3<f64>> {
    let mut positions = vec![Point3::origin(); specs.len() * vertices_per_ring];
    if vertices_per_ring == 0 {
        return positions;
    }

    positions
        .par_chunks_mut(vertices_per_ring)
        .zip(specs.par_iter())
        .for_each(|(ring, spec)| {
            for (k, slot) in ring.iter_mut().enumerate() {
                *slot = spec.vertex(k);
            }
        });

    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use curve_types::LineSegment;
    use nalgebra::Vector3;

    fn rope() -> LineSegment {
        LineSegment::new(Point3::origin(), Point3::new(0.0, 1.0, 0.0))
    }

    #[test]
    fn ring_parameters_pair_up() {
        let params: Vec<f64> = (0..8).map(|r| ring_parameter(r, 4)).collect();
        let third = 1.0 / 3.0;
        let expected = [0.0, 0.0, third, third, 2.0 * third, 2.0 * third, 1.0, 1.0];
        for (p, e) in params.iter().zip(expected) {
            assert_relative_eq!(*p, e, epsilon = 1e-12);
        }
    }

    #[test]
    fn straight_rope_ring_layout() {
        let config = RopeMeshConfig::default();
        let specs = ring_specs(&rope(), &config).unwrap();
        assert_eq!(specs.len(), 8);

        // Caps pushed outward beyond the endpoints with the cap radius.
        assert_relative_eq!(specs[0].frame.position, Point3::new(0.0, -0.1, 0.0), epsilon = 1e-12);
        assert_relative_eq!(specs[7].frame.position, Point3::new(0.0, 1.1, 0.0), epsilon = 1e-12);
        assert_relative_eq!(specs[0].radius, 0.05);
        assert_relative_eq!(specs[7].radius, 0.05);

        // Interior rings alternate push direction around shared samples.
        assert_relative_eq!(specs[1].frame.position.y, 0.1, epsilon = 1e-12);
        assert_relative_eq!(specs[2].frame.position.y, 1.0 / 3.0 - 0.1, epsilon = 1e-12);
        assert_relative_eq!(specs[3].frame.position.y, 1.0 / 3.0 + 0.1, epsilon = 1e-12);
        assert_relative_eq!(specs[6].frame.position.y, 0.9, epsilon = 1e-12);
        for spec in &specs[1..7] {
            assert_relative_eq!(spec.radius, 0.1);
            assert!(!spec.is_cap(8));
        }
        assert!(specs[0].is_cap(8) && specs[7].is_cap(8));
    }

    #[test]
    fn ring_vertices_lie_on_circle() {
        let config = RopeMeshConfig::default().with_vertices_per_ring(7);
        let specs = ring_specs(&rope(), &config).unwrap();
        let positions = ring_positions(&specs, 7);
        assert_eq!(positions.len(), 8 * 7);

        for (r, spec) in specs.iter().enumerate() {
            for k in 0..7 {
                let p = positions[r * 7 + k];
                let offset = p - spec.frame.position;
                assert_relative_eq!(offset.norm(), spec.radius, epsilon = 1e-12);
                assert_relative_eq!(offset.dot(&spec.frame.tangent), 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn first_ring_vertex_is_along_up() {
        let specs = ring_specs(&rope(), &RopeMeshConfig::default()).unwrap();
        let offset = specs[3].vertex(0) - specs[3].frame.position;
        assert_relative_eq!(offset, Vector3::new(0.0, 0.0, 0.1), epsilon = 1e-12);
    }

    #[test]
    fn rejects_single_segment() {
        let config = RopeMeshConfig::default()
            .with_segment_count(1)
            .with_vertices_per_ring(3);
        assert!(ring_specs(&rope(), &config).unwrap_err().is_invalid_topology());
    }

    #[test]
    fn rejects_coincident_endpoints() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let err = ring_specs(&LineSegment::new(p, p), &RopeMeshConfig::default()).unwrap_err();
        assert!(err.is_degenerate_curve());
    }
}
