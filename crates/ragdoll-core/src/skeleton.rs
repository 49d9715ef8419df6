//! Reference skeleton and skeletal mesh

use std::collections::HashMap;

use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::transform::BoneTransform;

/// A bone in the reference skeleton
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefBone {
    pub name: String,
    /// Parent bone index (None for the root)
    pub parent: Option<usize>,
    /// Bind-pose transform relative to the parent
    pub local_transform: BoneTransform,
}

/// Bind-pose bone hierarchy of a skeletal mesh
///
/// Bones are stored parents-first: a bone's parent index always precedes it
/// in the sequence. Read-only once built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceSkeleton {
    bones: Vec<RefBone>,
    /// Name to index for bones (O(1) lookup)
    #[serde(skip)]
    bone_name_index: HashMap<String, usize>,
}

impl ReferenceSkeleton {
    /// Create a new empty skeleton
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the name index (call after deserialization)
    pub fn rebuild_index(&mut self) {
        self.bone_name_index.clear();
        for (index, bone) in self.bones.iter().enumerate() {
            self.bone_name_index.insert(bone.name.clone(), index);
        }
    }

    /// Append a bone and return its index
    ///
    /// The parent must already be present; only the first bone may be a root.
    pub fn add_bone(
        &mut self,
        name: impl Into<String>,
        parent: Option<usize>,
        local_transform: BoneTransform,
    ) -> Result<usize, SkeletonError> {
        let name = name.into();
        if self.bone_name_index.contains_key(&name) {
            return Err(SkeletonError::DuplicateBoneName(name));
        }
        match parent {
            Some(parent_index) if parent_index >= self.bones.len() => {
                return Err(SkeletonError::ParentOutOfOrder(name));
            }
            None if !self.bones.is_empty() => {
                return Err(SkeletonError::MultipleRoots(name));
            }
            _ => {}
        }

        let index = self.bones.len();
        self.bone_name_index.insert(name.clone(), index);
        self.bones.push(RefBone {
            name,
            parent,
            local_transform,
        });
        Ok(index)
    }

    /// Find a bone index by name (O(1) lookup)
    pub fn find_bone_index(&self, name: &str) -> Option<usize> {
        self.bone_name_index.get(name).copied()
    }

    /// Get a bone's name by index
    pub fn bone_name(&self, index: usize) -> Option<&str> {
        self.bones.get(index).map(|b| b.name.as_str())
    }

    /// Get a bone's parent index (None for the root or an invalid index)
    pub fn parent_index(&self, index: usize) -> Option<usize> {
        self.bones.get(index).and_then(|b| b.parent)
    }

    /// Get a bone's bind-pose local transform
    pub fn local_transform(&self, index: usize) -> Option<&BoneTransform> {
        self.bones.get(index).map(|b| &b.local_transform)
    }

    /// Get a bone by index
    pub fn bone(&self, index: usize) -> Option<&RefBone> {
        self.bones.get(index)
    }

    /// All bones in sequence order
    pub fn bones(&self) -> &[RefBone] {
        &self.bones
    }

    /// Count of bones
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    /// Check if the skeleton has no bones
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Bind-pose transforms in component space, one per bone
    ///
    /// Parents-first storage makes this a single forward pass.
    pub fn component_space_transforms(&self) -> Vec<Mat4> {
        let mut transforms = Vec::with_capacity(self.bones.len());
        for bone in &self.bones {
            let local = bone.local_transform.to_mat4();
            let component = match bone.parent {
                Some(parent_index) => transforms[parent_index] * local,
                None => local,
            };
            transforms.push(component);
        }
        transforms
    }
}

/// A skeletal mesh providing the bind-pose skeleton for a merge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkeletalMesh {
    pub name: String,
    pub ref_skeleton: ReferenceSkeleton,
}

impl SkeletalMesh {
    /// Create a new skeletal mesh around a reference skeleton
    pub fn new(name: impl Into<String>, ref_skeleton: ReferenceSkeleton) -> Self {
        Self {
            name: name.into(),
            ref_skeleton,
        }
    }
}

/// Skeleton-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum SkeletonError {
    #[error("duplicate bone name: {0}")]
    DuplicateBoneName(String),
    #[error("parent of bone {0} is not yet in the skeleton")]
    ParentOutOfOrder(String),
    #[error("bone {0} would add a second root")]
    MultipleRoots(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn chain() -> ReferenceSkeleton {
        let mut skeleton = ReferenceSkeleton::new();
        let pelvis = skeleton
            .add_bone("pelvis", None, BoneTransform::IDENTITY)
            .unwrap();
        let spine = skeleton
            .add_bone(
                "spine01",
                Some(pelvis),
                BoneTransform::from_translation(Vec3::new(0.0, 0.0, 10.0)),
            )
            .unwrap();
        skeleton
            .add_bone(
                "spine02",
                Some(spine),
                BoneTransform::from_translation(Vec3::new(0.0, 0.0, 8.0)),
            )
            .unwrap();
        skeleton
    }

    #[test]
    fn test_find_bone_index() {
        let skeleton = chain();
        assert_eq!(skeleton.find_bone_index("pelvis"), Some(0));
        assert_eq!(skeleton.find_bone_index("spine02"), Some(2));
        assert_eq!(skeleton.find_bone_index("missing"), None);
    }

    #[test]
    fn test_parent_links() {
        let skeleton = chain();
        assert_eq!(skeleton.parent_index(0), None);
        assert_eq!(skeleton.parent_index(1), Some(0));
        assert_eq!(skeleton.parent_index(2), Some(1));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut skeleton = chain();
        let result = skeleton.add_bone("spine01", Some(0), BoneTransform::IDENTITY);
        assert!(matches!(result, Err(SkeletonError::DuplicateBoneName(_))));
    }

    #[test]
    fn test_second_root_rejected() {
        let mut skeleton = chain();
        let result = skeleton.add_bone("stray", None, BoneTransform::IDENTITY);
        assert!(matches!(result, Err(SkeletonError::MultipleRoots(_))));
    }

    #[test]
    fn test_parent_must_precede_child() {
        let mut skeleton = ReferenceSkeleton::new();
        let result = skeleton.add_bone("orphan", Some(3), BoneTransform::IDENTITY);
        assert!(matches!(result, Err(SkeletonError::ParentOutOfOrder(_))));
    }

    #[test]
    fn test_component_space_accumulation() {
        let skeleton = chain();
        let transforms = skeleton.component_space_transforms();
        // spine02 sits at pelvis + spine01 offset + spine02 offset
        let p = transforms[2].transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(0.0, 0.0, 18.0)).length() < 1e-5);
    }

    #[test]
    fn test_rebuild_index() {
        let mut skeleton = chain();
        skeleton.bone_name_index.clear();
        skeleton.rebuild_index();
        assert_eq!(skeleton.find_bone_index("spine01"), Some(1));
    }
}
