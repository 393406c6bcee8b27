//! Shared body types for the rope physics descriptors.
//!
//! - [`Pose`] - Position and orientation of bodies and joint frames
//! - [`BodyId`] - Identifier of a body handed to the physics collaborator
//! - [`MassProperties`] - Mass and inertia, including capsule shapes
//! - [`Twist`] - Linear and angular velocity
//!
//! These types are pure data. Nothing here integrates or solves; the physics
//! engine that consumes them is an external collaborator.
//!
//! # Coordinate System
//!
//! Right-handed world with `+Z` up by default. Body-local axes follow the
//! curve frame convention: `+X` forward, `+Y` up, `+Z` right.
//!
//! # Example
//!
//! ```
//! use sim_types::{MassProperties, Pose};
//! use nalgebra::Point3;
//!
//! let pose = Pose::from_position(Point3::new(0.0, 0.0, 1.0));
//! let mass = MassProperties::capsule(1.0, 0.05, 0.2);
//!
//! assert_eq!(pose.position.z, 1.0);
//! assert!(mass.validate().is_ok());
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,     // Many methods can't be const due to nalgebra
    clippy::suboptimal_flops,          // mul_add style changes aren't always clearer
    clippy::missing_errors_doc,        // Error docs added where non-obvious
)]

mod body;
mod error;

pub use body::{BodyId, MassProperties, Pose, Twist};
pub use error::SimError;

// Re-export math types for convenience
pub use nalgebra::{Point3, UnitQuaternion, Vector3};

/// Result type for simulation descriptor operations.
pub type Result<T> = std::result::Result<T, SimError>;
