//! Skeletons and physics chains for procedural ropes.
//!
//! Both halves of this crate sample the same curve the rope mesh was built
//! from, so the rendered tube, its bones and its rigid bodies stay aligned:
//!
//! - [`bind`]: one bone per inner segment, rigid single-bone vertex weights
//!   tied to the tube's ring layout ([`SkinBinding`])
//! - [`build_chain`]: one capsule body per bone, ragdoll joints between
//!   neighbors and anchors at both curve ends ([`CapsuleChain`])
//!
//! # Example
//!
//! ```
//! use curve_types::LineSegment;
//! use sim_deformable::{CapsuleChainConfig, SkinConfig, bind, build_chain};
//! use nalgebra::Point3;
//!
//! let curve = LineSegment::new(Point3::origin(), Point3::new(0.0, 2.0, 0.0));
//!
//! let skin = bind(&curve, 4, 5, &SkinConfig::default()).unwrap();
//! let chain = build_chain(&curve, 4, &CapsuleChainConfig::default()).unwrap();
//!
//! assert_eq!(skin.bone_count(), chain.len());
//! ```
//!
//! # Layer 0 Crate
//!
//! Produces plain descriptors. Simulating the chain and rendering the skin
//! are left to the host engine.

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::cast_precision_loss,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::must_use_candidate
)]

mod capsule_chain;
mod error;
mod skinning;

pub use capsule_chain::{Capsule, CapsuleChain, CapsuleChainConfig, ChainSegment, build_chain};
pub use error::{DeformableError, Result};
pub use skinning::{Bone, SkinBinding, SkinConfig, VertexWeight, bind, bone_for_ring};
