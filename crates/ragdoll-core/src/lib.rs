//! Ragdoll Merge Core Data Structures
//!
//! This crate contains the data model and merge algorithm for combining
//! per-bone physics assets over a shared skeleton:
//! - PhysicsAsset: bodies, constraints and the collision-disable table
//! - ReferenceSkeleton: bind-pose bone hierarchy
//! - merge: three-stage asset merge (bodies, constraints, overlap scan)

pub mod asset;
pub mod body;
pub mod constants;
pub mod constraint;
pub mod geometry;
pub mod merge;
pub mod overlap;
pub mod preview;
pub mod skeleton;
pub mod transform;

pub use asset::*;
pub use body::*;
pub use constants::*;
pub use constraint::*;
pub use geometry::*;
pub use merge::*;
pub use overlap::*;
pub use preview::*;
pub use skeleton::*;
pub use transform::*;
