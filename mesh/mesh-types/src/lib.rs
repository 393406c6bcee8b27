//! Core mesh types for generated geometry.
//!
//! - [`MeshBuffers`] - Parallel position/normal/uv buffers plus triangle indices
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Coordinate System
//!
//! Right-handed. Face winding is **counter-clockwise (CCW) when viewed from
//! outside**, so face normals point outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use mesh_types::{MeshBuffers, Point3, Vector2, Vector3};
//!
//! let mut mesh = MeshBuffers::new();
//! mesh.push_vertex(Point3::new(0.0, 0.0, 0.0), Vector3::z(), Vector2::new(0.0, 0.0));
//! mesh.push_vertex(Point3::new(1.0, 0.0, 0.0), Vector3::z(), Vector2::new(1.0, 0.0));
//! mesh.push_vertex(Point3::new(0.5, 1.0, 0.0), Vector3::z(), Vector2::new(0.5, 1.0));
//! mesh.indices.push([0, 1, 2]);
//!
//! assert_eq!(mesh.triangle_count(), 1);
//! assert!(mesh.validate().is_ok());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![allow(clippy::cast_possible_truncation, clippy::module_name_repetitions)]

mod bounds;
mod error;
mod mesh;
mod triangle;

pub use bounds::Aabb;
pub use error::MeshError;
pub use mesh::MeshBuffers;
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector2, Vector3};

/// Result type for mesh operations.
pub type Result<T> = std::result::Result<T, MeshError>;
