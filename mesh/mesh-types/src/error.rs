//! Error types for mesh buffer validation.

use thiserror::Error;

/// Errors found when validating [`MeshBuffers`](crate::MeshBuffers).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A triangle references a vertex that does not exist.
    #[error("triangle {triangle} references vertex {index}, but mesh has {vertex_count} vertices")]
    IndexOutOfBounds {
        /// Offending triangle.
        triangle: usize,
        /// Offending index.
        index: u32,
        /// Number of positions.
        vertex_count: usize,
    },

    /// A per-vertex attribute buffer has the wrong length.
    #[error("{attribute} has {actual} entries, expected {expected}")]
    AttributeLengthMismatch {
        /// Attribute name (`normals` or `uvs`).
        attribute: &'static str,
        /// Number of positions.
        expected: usize,
        /// Entries present.
        actual: usize,
    },

    /// More vertices than `u32` indices can address.
    #[error("mesh has {0} vertices, exceeding the u32 index range")]
    TooManyVertices(usize),
}
