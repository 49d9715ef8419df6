//! Global constants for ragdoll-core

/// Default swing limit for synthesized constraints, in degrees
pub const DEFAULT_SWING_LIMIT_DEG: f32 = 45.0;

/// Default twist limit for synthesized constraints, in degrees
pub const DEFAULT_TWIST_LIMIT_DEG: f32 = 45.0;

/// Name given to the merged output asset
pub const MERGED_ASSET_NAME: &str = "MergedPhysicsAsset";

/// Iteration cap for the GJK overlap test
pub const GJK_MAX_ITERATIONS: usize = 64;
