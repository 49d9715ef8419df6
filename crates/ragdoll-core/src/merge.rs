//! Merging physics assets over a shared skeleton
//!
//! Three sequential stages build one output asset: bodies are unioned by
//! bone name, a constraint is synthesized from every body to its nearest
//! ancestor body, and a posed overlap scan disables collision for pairs
//! that interpenetrate.

use glam::{Mat4, Vec3};

use crate::asset::PhysicsAsset;
use crate::constants::MERGED_ASSET_NAME;
use crate::constraint::ConstraintInstance;
use crate::preview::{BindPoseEvaluator, PoseEvaluator};
use crate::skeleton::{ReferenceSkeleton, SkeletalMesh};

/// Merge-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum MergeError {
    #[error("at least two physics assets are required, got {0}")]
    NotEnoughAssets(usize),
}

/// Merge several physics assets into one, driven by the mesh's skeleton
///
/// The evaluator poses the merged asset for the overlap scan; production
/// callers normally go through [`merge_at_bind_pose`], tests inject a
/// fixed-transform double.
pub fn merge_physics_assets(
    assets: &[PhysicsAsset],
    mesh: &SkeletalMesh,
    evaluator: &dyn PoseEvaluator,
) -> Result<PhysicsAsset, MergeError> {
    if assets.len() < 2 {
        tracing::warn!(
            "merge needs at least 2 physics assets, got {}",
            assets.len()
        );
        return Err(MergeError::NotEnoughAssets(assets.len()));
    }

    let mut merged = PhysicsAsset::new(MERGED_ASSET_NAME);

    merge_bodies(&mut merged, assets);
    synthesize_constraints(&mut merged, &mesh.ref_skeleton);
    resolve_collisions(&mut merged, mesh, evaluator);

    tracing::debug!(
        "merged {} assets into {} bodies, {} constraints",
        assets.len(),
        merged.body_count(),
        merged.constraint_count()
    );
    Ok(merged)
}

/// Merge several physics assets, posing the overlap scan at the bind pose
pub fn merge_at_bind_pose(
    assets: &[PhysicsAsset],
    mesh: &SkeletalMesh,
) -> Result<PhysicsAsset, MergeError> {
    merge_physics_assets(assets, mesh, &BindPoseEvaluator)
}

/// Stage 1: union bodies from all sources, copying geometry
///
/// Later sources overwrite the geometry of bones they share with earlier
/// ones (last writer wins).
fn merge_bodies(merged: &mut PhysicsAsset, assets: &[PhysicsAsset]) {
    for asset in assets {
        for body in &asset.bodies {
            let index = merged.create_body(body.bone_name.clone());
            merged.bodies[index].agg_geom = body.agg_geom.clone();
        }
    }
}

/// Stage 2: constrain every body to its nearest ancestor body
///
/// Bones are visited in the asset's documented enumeration order. The walk
/// accumulates each visited bone's bind-pose transform, so the parent-side
/// joint frame lands where the child sits relative to the ancestor.
fn synthesize_constraints(merged: &mut PhysicsAsset, skeleton: &ReferenceSkeleton) {
    for bone_name in merged.bone_names() {
        if merged.find_constraint_index(&bone_name).is_some() {
            continue;
        }
        let Some(body_index) = merged.find_body_index(&bone_name) else {
            continue;
        };
        let Some(bone_index) = skeleton.find_bone_index(&bone_name) else {
            continue;
        };

        let mut rel_tm = Mat4::IDENTITY;
        let mut current = bone_index;
        let mut attachment: Option<(String, usize)> = None;
        loop {
            // Transform of child from parent is just the child's ref-pose entry.
            if let Some(local) = skeleton.local_transform(current) {
                rel_tm = local.to_mat4() * rel_tm;
            }

            let Some(parent_index) = skeleton.parent_index(current) else {
                // Root reached, no body above this one
                break;
            };
            if let Some(parent_name) = skeleton.bone_name(parent_index)
                && let Some(parent_body) = merged.find_body_index(parent_name)
            {
                attachment = Some((parent_name.to_string(), parent_body));
                break;
            }
            current = parent_index;
        }

        let Some((parent_name, parent_body_index)) = attachment else {
            continue;
        };

        // Joint sits at the child's origin; the parent side carries the
        // accumulated child-to-ancestor placement.
        let mut constraint =
            ConstraintInstance::between(bone_name.clone(), bone_name.clone(), parent_name);
        constraint.parent_frame.position = rel_tm.transform_point3(Vec3::ZERO);
        constraint.parent_frame.primary_axis =
            rel_tm.transform_vector3(Vec3::X).normalize_or_zero();
        constraint.parent_frame.secondary_axis =
            rel_tm.transform_vector3(Vec3::Y).normalize_or_zero();
        merged.constraints.push(constraint);

        // Constrained pairs never collide.
        merged.disable_collision(body_index, parent_body_index);
    }
}

/// Stage 3: disable collision for geometrically overlapping body pairs
///
/// The posed scene is transient; it is dropped as soon as the scan ends.
/// Bodies that failed to instantiate are simply excluded from the scan.
fn resolve_collisions(
    merged: &mut PhysicsAsset,
    mesh: &SkeletalMesh,
    evaluator: &dyn PoseEvaluator,
) {
    let scene = evaluator.instantiate(mesh, merged);
    let bodies = scene.bodies();

    for (i, slot) in bodies.iter().enumerate() {
        let Some(body) = slot else { continue };
        for other_slot in &bodies[i + 1..] {
            let Some(other) = other_slot else { continue };
            if !merged.is_collision_enabled(body.body_index, other.body_index) {
                continue;
            }
            if scene.overlap_test(body, other) {
                merged.disable_collision(body.body_index, other.body_index);
            }
        }
    }
}
