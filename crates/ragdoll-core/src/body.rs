//! Per-bone body setups

use serde::{Deserialize, Serialize};

use crate::geometry::AggregateGeometry;

/// How collision queries treat the body's geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionComplexity {
    #[default]
    Default,
    /// Use the simple shapes for complex queries as well
    UseSimpleAsComplex,
    /// Use the complex mesh for simple queries as well
    UseComplexAsSimple,
}

/// How the body participates in simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SimulationKind {
    /// Follow the owner's default (simulate)
    #[default]
    Default,
    Kinematic,
    Simulated,
}

/// A simulatable collision volume bound to one bone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodySetup {
    pub bone_name: String,
    pub agg_geom: AggregateGeometry,
    pub collision_complexity: CollisionComplexity,
    pub simulation: SimulationKind,
    /// Whether this body contributes to asset bounds
    pub consider_for_bounds: bool,
}

impl BodySetup {
    /// Create a new body with creation defaults and no geometry
    pub fn new(bone_name: impl Into<String>) -> Self {
        Self {
            bone_name: bone_name.into(),
            agg_geom: AggregateGeometry::new(),
            collision_complexity: CollisionComplexity::UseSimpleAsComplex,
            simulation: SimulationKind::Default,
            consider_for_bounds: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation_defaults() {
        let body = BodySetup::new("pelvis");
        assert_eq!(body.bone_name, "pelvis");
        assert!(body.agg_geom.is_empty());
        assert_eq!(
            body.collision_complexity,
            CollisionComplexity::UseSimpleAsComplex
        );
        assert_eq!(body.simulation, SimulationKind::Default);
        assert!(body.consider_for_bounds);
    }
}
