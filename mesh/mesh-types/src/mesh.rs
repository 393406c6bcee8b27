//! Flat vertex/index buffers ready for upload.

use nalgebra::{Point3, Vector2, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Aabb, MeshError, Result, Triangle};

/// A triangle mesh as parallel per-vertex buffers plus an index list.
///
/// # Memory Layout
///
/// - `positions`, `normals`, `uvs`: one entry per vertex, same length
/// - `indices`: triangles as `[u32; 3]` into the vertex buffers
///
/// # Winding Order
///
/// Triangles are counter-clockwise when viewed from outside, so
/// [`face_normal`](Self::face_normal) points outward.
///
/// # Example
///
/// ```
/// use mesh_types::{MeshBuffers, Point3};
///
/// let mut mesh = MeshBuffers::new();
/// mesh.positions = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// mesh.uvs = vec![Default::default(); 3];
/// mesh.indices.push([0, 1, 2]);
/// mesh.recompute_normals();
///
/// assert!(mesh.validate().is_ok());
/// assert!((mesh.normals[0].z - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshBuffers {
    /// Vertex positions.
    pub positions: Vec<Point3<f64>>,
    /// Unit vertex normals.
    pub normals: Vec<Vector3<f64>>,
    /// Texture coordinates.
    pub uvs: Vec<Vector2<f64>>,
    /// Triangles as indices into the vertex buffers.
    pub indices: Vec<[u32; 3]>,
}

impl MeshBuffers {
    /// Create an empty mesh.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Create an empty mesh with reserved capacity.
    #[must_use]
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            uvs: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity(triangle_count),
        }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// True if there are no triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Push one vertex with all of its attributes.
    pub fn push_vertex(&mut self, position: Point3<f64>, normal: Vector3<f64>, uv: Vector2<f64>) {
        self.positions.push(position);
        self.normals.push(normal);
        self.uvs.push(uv);
    }

    /// Check index bounds and attribute lengths.
    ///
    /// # Errors
    ///
    /// - [`MeshError::AttributeLengthMismatch`] if `normals` or `uvs` differ
    ///   in length from `positions`.
    /// - [`MeshError::TooManyVertices`] if `u32` cannot address every vertex.
    /// - [`MeshError::IndexOutOfBounds`] for the first bad index.
    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.positions.len();
        if self.normals.len() != vertex_count {
            return Err(MeshError::AttributeLengthMismatch {
                attribute: "normals",
                expected: vertex_count,
                actual: self.normals.len(),
            });
        }
        if self.uvs.len() != vertex_count {
            return Err(MeshError::AttributeLengthMismatch {
                attribute: "uvs",
                expected: vertex_count,
                actual: self.uvs.len(),
            });
        }
        if u32::try_from(vertex_count).is_err() {
            return Err(MeshError::TooManyVertices(vertex_count));
        }

        for (triangle, face) in self.indices.iter().enumerate() {
            if let Some(&index) = face.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::IndexOutOfBounds {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Triangle `index` with resolved positions.
    #[must_use]
    pub fn triangle(&self, index: usize) -> Option<Triangle> {
        let [a, b, c] = *self.indices.get(index)?;
        Some(Triangle::new(
            *self.positions.get(a as usize)?,
            *self.positions.get(b as usize)?,
            *self.positions.get(c as usize)?,
        ))
    }

    /// Iterate over all triangles with resolved positions.
    ///
    /// Triangles with out-of-range indices are skipped.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.indices.len()).filter_map(|i| self.triangle(i))
    }

    /// Unit normal of triangle `index` from its winding.
    ///
    /// `None` if the triangle does not exist or has zero area.
    #[must_use]
    pub fn face_normal(&self, index: usize) -> Option<Vector3<f64>> {
        self.triangle(index)?.normal()
    }

    /// Replace `normals` with area-weighted averages of adjacent face normals.
    ///
    /// Vertices touched only by zero-area triangles (or by none) get a zero
    /// normal.
    pub fn recompute_normals(&mut self) {
        let mut accum = vec![Vector3::zeros(); self.positions.len()];
        for face in &self.indices {
            let [a, b, c] = face.map(|i| i as usize);
            let (Some(pa), Some(pb), Some(pc)) =
                (self.positions.get(a), self.positions.get(b), self.positions.get(c))
            else {
                continue;
            };
            // Magnitude is twice the area, which gives the weighting.
            let n = Triangle::new(*pa, *pb, *pc).scaled_normal();
            accum[a] += n;
            accum[b] += n;
            accum[c] += n;
        }

        self.normals = accum
            .into_iter()
            .map(|n| n.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::zeros))
            .collect();
    }

    /// Signed volume by the divergence theorem.
    ///
    /// Positive for a closed mesh with outward winding, negative if inside-out.
    /// Not meaningful for open meshes.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        self.triangles().map(|t| t.signed_volume()).sum()
    }

    /// Total surface area.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.triangles().map(|t| t.area()).sum()
    }

    /// Axis-aligned bounds of all positions.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.positions.iter())
    }

    /// Append `other`, offsetting its indices past this mesh's vertices.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::TooManyVertices`] if the combined vertex count
    /// does not fit in `u32`.
    pub fn append(&mut self, other: &Self) -> Result<()> {
        let combined = self.positions.len() + other.positions.len();
        if u32::try_from(combined).is_err() {
            return Err(MeshError::TooManyVertices(combined));
        }
        let offset = self.positions.len() as u32;

        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices
            .extend(other.indices.iter().map(|face| face.map(|i| i + offset)));
        Ok(())
    }

    /// Indices as a flat `u32` list, three per triangle.
    #[must_use]
    pub fn flat_indices(&self) -> Vec<u32> {
        self.indices.iter().flatten().copied().collect()
    }
}
