//! Transient pose instantiation for overlap testing
//!
//! A [`PoseEvaluator`] materializes a physics asset against one concrete
//! skeletal pose and hands back a [`PosedScene`]: one positioned body
//! instance per body setup that could be instantiated. The scene is a
//! scoped resource; dropping it releases all instantiation state, so a
//! merge leaves nothing behind on any exit path.

use glam::{Quat, Vec3};

use crate::asset::PhysicsAsset;
use crate::geometry::AggregateGeometry;
use crate::overlap::aggregates_overlap;
use crate::skeleton::SkeletalMesh;

/// One successfully instantiated body at the evaluated pose
#[derive(Debug, Clone)]
pub struct BodyInstance {
    /// Index of the body setup in the owning asset
    pub body_index: usize,
    pub translation: Vec3,
    pub rotation: Quat,
}

/// A posed instantiation of a physics asset
///
/// `bodies()` has one slot per body setup, in body-sequence order; `None`
/// marks a body that failed to instantiate.
pub trait PosedScene {
    fn bodies(&self) -> &[Option<BodyInstance>];

    /// Test two instantiated bodies for geometric overlap
    fn overlap_test(&self, a: &BodyInstance, b: &BodyInstance) -> bool;
}

/// Capability to instantiate an asset against a skeletal pose
pub trait PoseEvaluator {
    fn instantiate(&self, mesh: &SkeletalMesh, asset: &PhysicsAsset) -> Box<dyn PosedScene>;
}

/// Scene holding per-body world placements and collision geometry
struct GeometryScene {
    instances: Vec<Option<BodyInstance>>,
    geometries: Vec<AggregateGeometry>,
}

impl PosedScene for GeometryScene {
    fn bodies(&self) -> &[Option<BodyInstance>] {
        &self.instances
    }

    fn overlap_test(&self, a: &BodyInstance, b: &BodyInstance) -> bool {
        aggregates_overlap(
            a.translation,
            a.rotation,
            &self.geometries[a.body_index],
            b.translation,
            b.rotation,
            &self.geometries[b.body_index],
        )
    }
}

/// Poses every body at the skeleton's bind pose
///
/// A body fails to instantiate when its bone is missing from the skeleton
/// or its aggregate geometry is empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct BindPoseEvaluator;

impl PoseEvaluator for BindPoseEvaluator {
    fn instantiate(&self, mesh: &SkeletalMesh, asset: &PhysicsAsset) -> Box<dyn PosedScene> {
        let component_space = mesh.ref_skeleton.component_space_transforms();

        let instances = asset
            .bodies
            .iter()
            .enumerate()
            .map(|(body_index, body)| {
                if body.agg_geom.is_empty() {
                    return None;
                }
                let bone_index = mesh.ref_skeleton.find_bone_index(&body.bone_name)?;
                let (_, rotation, translation) =
                    component_space[bone_index].to_scale_rotation_translation();
                Some(BodyInstance {
                    body_index,
                    translation,
                    rotation,
                })
            })
            .collect();

        Box::new(GeometryScene {
            instances,
            geometries: asset.bodies.iter().map(|b| b.agg_geom.clone()).collect(),
        })
    }
}
