//! Joint constraints between bodies

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SWING_LIMIT_DEG, DEFAULT_TWIST_LIMIT_DEG};

/// Motion mode of one angular degree of freedom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AngularMotion {
    Free,
    Limited,
    Locked,
}

/// Joint frame on one side of a constraint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintFrame {
    /// Bone the frame is anchored to
    pub bone: String,
    /// Frame position in the bone's local space
    pub position: Vec3,
    pub primary_axis: Vec3,
    pub secondary_axis: Vec3,
}

impl ConstraintFrame {
    /// Identity frame at the bone origin (+X primary, +Y secondary)
    pub fn identity(bone: impl Into<String>) -> Self {
        Self {
            bone: bone.into(),
            position: Vec3::ZERO,
            primary_axis: Vec3::X,
            secondary_axis: Vec3::Y,
        }
    }
}

/// A joint between a child bone and an ancestor bone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintInstance {
    /// Joint name; by convention the child bone's name
    pub joint_name: String,
    /// Frame on the child end
    pub child_frame: ConstraintFrame,
    /// Frame on the parent end
    pub parent_frame: ConstraintFrame,
    pub swing1_motion: AngularMotion,
    pub swing2_motion: AngularMotion,
    pub twist_motion: AngularMotion,
    pub swing1_limit_deg: f32,
    pub swing2_limit_deg: f32,
    pub twist_limit_deg: f32,
}

impl ConstraintInstance {
    /// Create a constraint between two bones with identity frames and
    /// limited angular motion on all three axes
    pub fn between(
        joint_name: impl Into<String>,
        child_bone: impl Into<String>,
        parent_bone: impl Into<String>,
    ) -> Self {
        Self {
            joint_name: joint_name.into(),
            child_frame: ConstraintFrame::identity(child_bone),
            parent_frame: ConstraintFrame::identity(parent_bone),
            swing1_motion: AngularMotion::Limited,
            swing2_motion: AngularMotion::Limited,
            twist_motion: AngularMotion::Limited,
            swing1_limit_deg: DEFAULT_SWING_LIMIT_DEG,
            swing2_limit_deg: DEFAULT_SWING_LIMIT_DEG,
            twist_limit_deg: DEFAULT_TWIST_LIMIT_DEG,
        }
    }
}
