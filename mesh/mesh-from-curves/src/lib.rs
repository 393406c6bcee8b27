//! Generate triangle meshes from curves.
//!
//! Two generators are provided:
//!
//! - **Rope tubes** ([`generate_rope_mesh`]): capped tubes of `2S` rings
//!   placed along any [`Curve`](curve_types::Curve), with tapered end rings
//!   and smooth normals.
//! - **Rails** ([`build_rail_mesh`]): flat-shaded rectangular bars extruded
//!   along a [`Spline`](curve_types::Spline), with rounded corners at knots.
//!
//! # Coordinate System
//!
//! Right-handed. Triangles wind counter-clockwise seen from outside, so
//! closed outputs have positive signed volume.
//!
//! # Quick Start
//!
//! ```
//! use curve_types::LineSegment;
//! use mesh_from_curves::{RopeMeshConfig, generate_rope_mesh};
//! use nalgebra::Point3;
//!
//! let curve = LineSegment::new(Point3::origin(), Point3::new(0.0, 1.0, 0.0));
//! let config = RopeMeshConfig::default()
//!     .with_segment_count(6)
//!     .with_vertices_per_ring(8);
//!
//! let mesh = generate_rope_mesh(&curve, &config).unwrap();
//! assert_eq!(mesh.vertex_count(), 12 * 8);
//! assert!(mesh.signed_volume() > 0.0);
//! ```
//!
//! # Features
//!
//! - `serde`: Serialize/deserialize configurations and intermediate layouts

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc
)]

mod config;
mod error;
mod indices;
mod rail;
mod rings;
mod rope;

pub use config::{RailConfig, RopeMeshConfig};
pub use error::{GenerateError, GenerateResult};
pub use indices::{build_indices, index_count};
pub use rail::{
    RailSection, SECTION_VERTICES, build_rail_mesh, corner_sweep, extrude_sections, stub_section,
};
pub use rings::{RingSpec, ring_parameter, ring_positions, ring_specs};
pub use rope::generate_rope_mesh;
