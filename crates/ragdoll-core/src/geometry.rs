//! Collision geometry for body setups

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Primitive collision shape kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum ShapeKind {
    Sphere {
        radius: f32,
    },
    Box {
        half_extents: Vec3,
    },
    /// Capsule along the local Z axis
    Capsule {
        radius: f32,
        half_length: f32,
    },
}

/// One primitive shape positioned in bone-local space
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CollisionShape {
    /// Offset of the shape center from the bone origin
    pub offset: Vec3,
    /// Rotation of the shape relative to the bone
    pub rotation: Quat,
    pub kind: ShapeKind,
}

impl CollisionShape {
    /// Create a sphere at an offset
    pub fn sphere(offset: Vec3, radius: f32) -> Self {
        Self {
            offset,
            rotation: Quat::IDENTITY,
            kind: ShapeKind::Sphere { radius },
        }
    }

    /// Create a box at an offset
    pub fn cuboid(offset: Vec3, half_extents: Vec3) -> Self {
        Self {
            offset,
            rotation: Quat::IDENTITY,
            kind: ShapeKind::Box { half_extents },
        }
    }

    /// Create a Z-aligned capsule at an offset
    pub fn capsule(offset: Vec3, radius: f32, half_length: f32) -> Self {
        Self {
            offset,
            rotation: Quat::IDENTITY,
            kind: ShapeKind::Capsule {
                radius,
                half_length,
            },
        }
    }
}

/// Aggregate collision geometry of one body (set of primitive shapes)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregateGeometry {
    pub shapes: Vec<CollisionShape>,
}

impl AggregateGeometry {
    /// Create an empty aggregate
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aggregate from a list of shapes
    pub fn from_shapes(shapes: Vec<CollisionShape>) -> Self {
        Self { shapes }
    }

    /// Count of primitive shapes
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Check if the aggregate has no shapes
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_counts() {
        let geom = AggregateGeometry::from_shapes(vec![
            CollisionShape::sphere(Vec3::ZERO, 1.0),
            CollisionShape::capsule(Vec3::new(0.0, 0.0, 2.0), 0.5, 1.0),
        ]);
        assert_eq!(geom.shape_count(), 2);
        assert!(!geom.is_empty());
        assert!(AggregateGeometry::new().is_empty());
    }
}
