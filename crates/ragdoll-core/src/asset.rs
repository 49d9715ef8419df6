//! Physics asset container

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::body::BodySetup;
use crate::constraint::ConstraintInstance;

/// Unordered pair of body indices (normalized: low index first)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyPair(usize, usize);

impl BodyPair {
    /// Create a normalized pair; order of the arguments does not matter
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    /// Lower body index
    pub fn low(&self) -> usize {
        self.0
    }

    /// Higher body index
    pub fn high(&self) -> usize {
        self.1
    }
}

/// A collection of per-bone bodies and joint constraints for one skeleton
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsAsset {
    pub name: String,
    /// All bodies, in creation order
    pub bodies: Vec<BodySetup>,
    /// All constraints, in creation order
    pub constraints: Vec<ConstraintInstance>,
    /// Bone name to body index (kept consistent with `bodies`)
    #[serde(skip)]
    body_index_map: HashMap<String, usize>,
    /// Body pairs that must not collide (symmetric)
    pub collision_disable: HashSet<BodyPair>,
    /// Indices of bodies that contribute to asset bounds
    #[serde(skip)]
    bounds_bodies: Vec<usize>,
}

impl Default for PhysicsAsset {
    fn default() -> Self {
        Self::new("PhysicsAsset")
    }
}

impl PhysicsAsset {
    /// Create a new empty asset
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bodies: Vec::new(),
            constraints: Vec::new(),
            body_index_map: HashMap::new(),
            collision_disable: HashSet::new(),
            bounds_bodies: Vec::new(),
        }
    }

    /// Find a body index by bone name (O(1) lookup)
    pub fn find_body_index(&self, bone_name: &str) -> Option<usize> {
        self.body_index_map.get(bone_name).copied()
    }

    /// Find a constraint index by joint name
    pub fn find_constraint_index(&self, joint_name: &str) -> Option<usize> {
        self.constraints
            .iter()
            .position(|c| c.joint_name == joint_name)
    }

    /// Get or create the body for a bone
    ///
    /// Idempotent on bone name: if a body already exists its index is
    /// returned unchanged. Otherwise a body with creation defaults is
    /// appended, the index map and bounds list are refreshed, and collision
    /// is disabled between the new body and every body already present.
    pub fn create_body(&mut self, bone_name: impl Into<String>) -> usize {
        let bone_name = bone_name.into();
        if let Some(index) = self.find_body_index(&bone_name) {
            return index;
        }

        let index = self.bodies.len();
        self.bodies.push(BodySetup::new(bone_name));
        self.update_body_index_map();
        self.update_bounds_bodies();

        // New bodies start collision-isolated against everything present.
        for other in 0..self.bodies.len() {
            self.disable_collision(other, index);
        }

        index
    }

    /// Rebuild the bone-name to body-index map from the body sequence
    /// (call after deserialization)
    pub fn update_body_index_map(&mut self) {
        self.body_index_map.clear();
        for (index, body) in self.bodies.iter().enumerate() {
            self.body_index_map.insert(body.bone_name.clone(), index);
        }
    }

    /// Rebuild the list of bodies that contribute to bounds
    pub fn update_bounds_bodies(&mut self) {
        self.bounds_bodies = self
            .bodies
            .iter()
            .enumerate()
            .filter(|(_, body)| body.consider_for_bounds)
            .map(|(index, _)| index)
            .collect();
    }

    /// Indices of bodies that contribute to bounds
    pub fn bounds_bodies(&self) -> &[usize] {
        &self.bounds_bodies
    }

    /// Disable collision between two bodies (symmetric; self pair is a no-op)
    pub fn disable_collision(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.collision_disable.insert(BodyPair::new(a, b));
    }

    /// Re-enable collision between two bodies (symmetric)
    pub fn enable_collision(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.collision_disable.remove(&BodyPair::new(a, b));
    }

    /// Check whether two bodies may collide (self pair never collides)
    pub fn is_collision_enabled(&self, a: usize, b: usize) -> bool {
        a != b && !self.collision_disable.contains(&BodyPair::new(a, b))
    }

    /// Bone names of all bodies, in body-sequence (creation) order
    ///
    /// This is the documented deterministic enumeration order for the asset.
    pub fn bone_names(&self) -> Vec<String> {
        self.bodies.iter().map(|b| b.bone_name.clone()).collect()
    }

    /// Count of bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Count of constraints
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Check if the asset has no bodies
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_pair_normalized() {
        assert_eq!(BodyPair::new(3, 1), BodyPair::new(1, 3));
        assert_eq!(BodyPair::new(3, 1).low(), 1);
        assert_eq!(BodyPair::new(3, 1).high(), 3);
    }

    #[test]
    fn test_create_body_idempotent() {
        let mut asset = PhysicsAsset::new("test");
        let first = asset.create_body("pelvis");
        let second = asset.create_body("pelvis");
        assert_eq!(first, second);
        assert_eq!(asset.body_count(), 1);
    }

    #[test]
    fn test_index_map_consistent_after_insertion() {
        let mut asset = PhysicsAsset::new("test");
        asset.create_body("pelvis");
        asset.create_body("spine01");
        assert_eq!(asset.find_body_index("pelvis"), Some(0));
        assert_eq!(asset.find_body_index("spine01"), Some(1));
        assert_eq!(asset.find_body_index("missing"), None);
    }

    #[test]
    fn test_new_body_isolated_from_existing() {
        let mut asset = PhysicsAsset::new("test");
        asset.create_body("a");
        asset.create_body("b");
        asset.create_body("c");
        assert!(!asset.is_collision_enabled(0, 1));
        assert!(!asset.is_collision_enabled(0, 2));
        assert!(!asset.is_collision_enabled(1, 2));
    }

    #[test]
    fn test_disable_is_symmetric() {
        let mut asset = PhysicsAsset::new("test");
        asset.create_body("a");
        asset.create_body("b");
        asset.enable_collision(0, 1);
        assert!(asset.is_collision_enabled(1, 0));
        asset.disable_collision(1, 0);
        assert!(!asset.is_collision_enabled(0, 1));
    }

    #[test]
    fn test_self_pair_noop() {
        let mut asset = PhysicsAsset::new("test");
        asset.create_body("a");
        asset.disable_collision(0, 0);
        assert!(asset.collision_disable.is_empty());
        assert!(!asset.is_collision_enabled(0, 0));
    }

    #[test]
    fn test_bone_names_in_creation_order() {
        let mut asset = PhysicsAsset::new("test");
        asset.create_body("pelvis");
        asset.create_body("spine01");
        asset.create_body("head");
        assert_eq!(asset.bone_names(), vec!["pelvis", "spine01", "head"]);
    }

    #[test]
    fn test_bounds_bodies_respects_flag() {
        let mut asset = PhysicsAsset::new("test");
        asset.create_body("a");
        asset.create_body("b");
        asset.bodies[0].consider_for_bounds = false;
        asset.update_bounds_bodies();
        assert_eq!(asset.bounds_bodies(), &[1]);
    }

    #[test]
    fn test_find_constraint_index() {
        let mut asset = PhysicsAsset::new("test");
        asset.constraints.push(
            crate::constraint::ConstraintInstance::between("spine01", "spine01", "pelvis"),
        );
        assert_eq!(asset.find_constraint_index("spine01"), Some(0));
        assert_eq!(asset.find_constraint_index("pelvis"), None);
    }
}
