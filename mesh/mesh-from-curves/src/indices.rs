//! Triangle indices for ring-based tubes.

/// Number of index entries (three per triangle) for a capped tube.
///
/// `(ring_count - 1) * vertices_per_ring * 6` for the wall plus
/// `(vertices_per_ring - 1) * 3` for each cap.
#[must_use]
pub fn index_count(ring_count: usize, vertices_per_ring: usize) -> usize {
    ring_count.saturating_sub(1) * vertices_per_ring * 6 + vertices_per_ring.saturating_sub(1) * 2 * 3
}

/// Build the wall and cap triangles of a tube with `ring_count` rings.
///
/// Vertices are ring-major: vertex `j` of ring `i` is `i * vertices_per_ring + j`,
/// running counter-clockwise around the tangent. Every triangle winds
/// counter-clockwise seen from outside.
///
/// Each cap is a fan of `vertices_per_ring - 1` triangles, the first of which
/// is degenerate (it repeats the fan apex). Consumers relying on the exact
/// index count get `index_count(ring_count, vertices_per_ring)` entries.
#[must_use]
pub fn build_indices(ring_count: usize, vertices_per_ring: usize) -> Vec<[u32; 3]> {
    let mut triangles = Vec::with_capacity(index_count(ring_count, vertices_per_ring) / 3);
    if ring_count < 2 || vertices_per_ring < 3 {
        return triangles;
    }

    let vpr = vertices_per_ring as u32;

    for ring in 0..ring_count as u32 - 1 {
        let ring_start = ring * vpr;
        let next_ring_start = ring_start + vpr;
        for j in 0..vpr {
            let next_j = (j + 1) % vpr;
            triangles.push([ring_start + j, ring_start + next_j, next_ring_start + j]);
            triangles.push([next_ring_start + j, ring_start + next_j, next_ring_start + next_j]);
        }
    }

    // Start cap faces back along the tangent.
    for i in 0..vpr - 1 {
        triangles.push([0, (i + 1) % vpr, i]);
    }

    // End cap mirrors it from the very last vertex.
    let last = ring_count as u32 * vpr - 1;
    for i in 0..vpr - 1 {
        let next_i = (i + 1) % vpr;
        triangles.push([last, last - next_i, last - i]);
    }

    triangles
}
