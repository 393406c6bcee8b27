//! Joint specifications for rope physics chains and path-following bodies.
//!
//! This crate describes constraints; it never solves them. The physics
//! engine consuming the descriptors is an external collaborator.
//!
//! # Joint Kinds
//!
//! - [`JointKind::ConeTwist`] and [`JointKind::PerpendicularCone`]: the two
//!   halves of a ragdoll joint pair, built together by [`ragdoll_pair`]
//! - [`JointKind::BallAndSocket`]: pins a body point to the world, see [`anchor`]
//! - [`JointKind::Prismatic`]: slides a body along a path segment, see
//!   [`prismatic_between`]
//!
//! # Paths
//!
//! [`PathCursor`] steps a body from one polyline segment to the next by
//! replacing its prismatic joint. The cursor is plain state returned from
//! each step rather than a hidden counter. [`PathMotor`] instead drives a
//! body kinematically, ping-ponging along the whole path.
//!
//! # Example
//!
//! ```
//! use sim_constraint::{anchor, prismatic_between, JointKind};
//! use sim_types::BodyId;
//! use nalgebra::Point3;
//!
//! let pin = anchor(BodyId::new(0), Point3::origin(), Point3::new(0.0, 0.0, 2.0));
//! assert!(pin.is_world_anchored());
//!
//! let slide = prismatic_between(
//!     BodyId::new(1),
//!     Point3::origin(),
//!     Point3::new(0.0, 3.0, 0.0),
//! )
//! .unwrap();
//! assert_eq!(slide.kind.dof(), 1);
//! ```
//!
//! # Layer 0 Crate
//!
//! No engine dependencies; the specs are plain data, serializable with the
//! `serde` feature.

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::must_use_candidate
)]

mod error;
mod joint;
mod limits;
mod motor;
mod path;
mod types;

pub use error::ConstraintError;
pub use joint::{JointFrame, JointKind, JointSpec, anchor, prismatic_between, ragdoll_pair};
pub use limits::JointLimits;
pub use motor::{MotorCommand, PathMotor};
pub use path::{PathCursor, PathStep};
pub use types::RagdollLimits;

/// Result type for joint construction.
pub type Result<T> = std::result::Result<T, ConstraintError>;
