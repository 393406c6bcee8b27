//! Procedural rope rigs.
//!
//! Given one curve, `rope-rig` produces everything a host engine needs to
//! show and simulate a rope:
//!
//! - a capped tube mesh ([`mesh_from_curves::generate_rope_mesh`])
//! - bones and rigid vertex weights for skinning it ([`sim_deformable::bind`])
//! - capsule bodies with ragdoll and anchor joints ([`sim_deformable::build_chain`])
//!
//! All three read the same curve and segment count, which keeps the rendered
//! tube, its skeleton and its physics bodies aligned.
//!
//! # Quick Start
//!
//! ```
//! use rope_rig::{CurveSpec, RopeConfig, generate};
//! use nalgebra::Point3;
//!
//! let curve = CurveSpec::through(vec![
//!     Point3::new(0.0, 0.0, 2.0),
//!     Point3::new(1.0, 0.0, 1.2),
//!     Point3::new(2.0, 0.0, 2.0),
//! ])
//! .unwrap();
//!
//! let asset = generate(&curve, &RopeConfig::default().with_segment_count(8)).unwrap();
//! assert_eq!(asset.skin.bone_count(), 7);
//! assert_eq!(asset.chain.joints().len(), 2 * 6 + 2);
//! ```
//!
//! # Regeneration
//!
//! [`RopeInstance`] owns the last input snapshot and the last good asset.
//! Feed it the current snapshot whenever the authored data may have changed;
//! it rebuilds only when [`regeneration_decision`] says so.
//!
//! # Features
//!
//! - `serde`: Serialize/deserialize configurations, snapshots and assets

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

mod config;
mod curve;
mod error;
mod pipeline;
mod regen;

pub use config::RopeConfig;
pub use curve::CurveSpec;
pub use error::{Result, RigError};
pub use pipeline::{RopeAsset, curve_local_positions, generate};
pub use regen::{RegenerationDecision, RopeInstance, RopeSnapshot, regeneration_decision};

pub use curve_types;
pub use mesh_from_curves;
pub use mesh_types;
pub use sim_constraint;
pub use sim_deformable;
pub use sim_types;
