//! Geometric overlap testing between positioned collision shapes
//!
//! Boolean GJK over convex support functions. Every primitive shape kind
//! maps to a support function, so a single algorithm covers all pairs.

use glam::{Quat, Vec3};

use crate::constants::GJK_MAX_ITERATIONS;
use crate::geometry::{AggregateGeometry, CollisionShape, ShapeKind};

/// Support function for GJK
pub trait Support {
    /// Returns the point on the shape furthest in the given direction
    fn support(&self, direction: Vec3) -> Vec3;
}

/// A collision shape positioned in world space
#[derive(Debug, Clone, Copy)]
pub struct WorldShape {
    pub translation: Vec3,
    pub rotation: Quat,
    pub kind: ShapeKind,
}

impl WorldShape {
    /// Position a bone-local shape with its owning body's world transform
    pub fn from_local(
        body_translation: Vec3,
        body_rotation: Quat,
        shape: &CollisionShape,
    ) -> Self {
        Self {
            translation: body_translation + body_rotation * shape.offset,
            rotation: body_rotation * shape.rotation,
            kind: shape.kind,
        }
    }
}

impl Support for WorldShape {
    fn support(&self, direction: Vec3) -> Vec3 {
        match self.kind {
            ShapeKind::Sphere { radius } => {
                self.translation + direction.normalize_or_zero() * radius
            }
            ShapeKind::Box { half_extents } => {
                // Pick the corner furthest along the direction in local axes
                let local_dir = self.rotation.inverse() * direction;
                let corner = Vec3::new(
                    half_extents.x.copysign(local_dir.x),
                    half_extents.y.copysign(local_dir.y),
                    half_extents.z.copysign(local_dir.z),
                );
                self.translation + self.rotation * corner
            }
            ShapeKind::Capsule {
                radius,
                half_length,
            } => {
                let axis = self.rotation * Vec3::Z * half_length;
                let a = self.translation + axis;
                let b = self.translation - axis;
                let base = if a.dot(direction) > b.dot(direction) {
                    a
                } else {
                    b
                };
                base + direction.normalize_or_zero() * radius
            }
        }
    }
}

/// Minkowski difference support function
#[inline]
fn minkowski_support<A: Support, B: Support>(a: &A, b: &B, direction: Vec3) -> Vec3 {
    a.support(direction) - b.support(-direction)
}

/// Simplex for GJK (up to 4 points in 3D)
struct Simplex {
    points: [Vec3; 4],
    size: usize,
}

impl Simplex {
    fn new() -> Self {
        Self {
            points: [Vec3::ZERO; 4],
            size: 0,
        }
    }

    fn push(&mut self, point: Vec3) {
        for i in (1..4).rev() {
            self.points[i] = self.points[i - 1];
        }
        self.points[0] = point;
        self.size = (self.size + 1).min(4);
    }

    fn set(&mut self, points: &[Vec3]) {
        for (i, &p) in points.iter().enumerate().take(4) {
            self.points[i] = p;
        }
        self.size = points.len().min(4);
    }
}

/// GJK intersection test
///
/// Returns true if the two convex shapes overlap.
pub fn gjk_intersects<A: Support, B: Support>(a: &A, b: &B) -> bool {
    let mut direction = Vec3::X;

    let mut simplex = Simplex::new();
    simplex.push(minkowski_support(a, b, direction));
    direction = -simplex.points[0];

    for _ in 0..GJK_MAX_ITERATIONS {
        if direction.length_squared() < 1e-12 {
            // Origin lies on the simplex
            return true;
        }

        let new_point = minkowski_support(a, b, direction);
        if new_point.dot(direction) < 0.0 {
            // The new point never passed the origin: shapes are separated
            return false;
        }

        simplex.push(new_point);
        if do_simplex(&mut simplex, &mut direction) {
            return true;
        }
    }

    false
}

/// Test whether any shape pair of two positioned aggregates overlaps
pub fn aggregates_overlap(
    translation_a: Vec3,
    rotation_a: Quat,
    geom_a: &AggregateGeometry,
    translation_b: Vec3,
    rotation_b: Quat,
    geom_b: &AggregateGeometry,
) -> bool {
    for shape_a in &geom_a.shapes {
        let world_a = WorldShape::from_local(translation_a, rotation_a, shape_a);
        for shape_b in &geom_b.shapes {
            let world_b = WorldShape::from_local(translation_b, rotation_b, shape_b);
            if gjk_intersects(&world_a, &world_b) {
                return true;
            }
        }
    }
    false
}

/// Process the simplex and update the search direction toward the origin
fn do_simplex(simplex: &mut Simplex, direction: &mut Vec3) -> bool {
    match simplex.size {
        2 => do_simplex_line(simplex, direction),
        3 => do_simplex_triangle(simplex, direction),
        4 => do_simplex_tetrahedron(simplex, direction),
        _ => false,
    }
}

fn do_simplex_line(simplex: &mut Simplex, direction: &mut Vec3) -> bool {
    let a = simplex.points[0];
    let b = simplex.points[1];
    let ab = b - a;
    let ao = -a;

    if ab.dot(ao) > 0.0 {
        *direction = ab.cross(ao).cross(ab);
    } else {
        simplex.set(&[a]);
        *direction = ao;
    }

    false
}

fn do_simplex_triangle(simplex: &mut Simplex, direction: &mut Vec3) -> bool {
    let a = simplex.points[0];
    let b = simplex.points[1];
    let c = simplex.points[2];

    let ab = b - a;
    let ac = c - a;
    let ao = -a;
    let abc = ab.cross(ac);

    if abc.cross(ac).dot(ao) > 0.0 {
        if ac.dot(ao) > 0.0 {
            simplex.set(&[a, c]);
            *direction = ac.cross(ao).cross(ac);
        } else {
            simplex.set(&[a, b]);
            return do_simplex_line(simplex, direction);
        }
    } else if ab.cross(abc).dot(ao) > 0.0 {
        simplex.set(&[a, b]);
        return do_simplex_line(simplex, direction);
    } else if abc.dot(ao) > 0.0 {
        *direction = abc;
    } else {
        simplex.set(&[a, c, b]);
        *direction = -abc;
    }

    false
}

fn do_simplex_tetrahedron(simplex: &mut Simplex, direction: &mut Vec3) -> bool {
    let a = simplex.points[0];
    let b = simplex.points[1];
    let c = simplex.points[2];
    let d = simplex.points[3];

    let ab = b - a;
    let ac = c - a;
    let ad = d - a;
    let ao = -a;

    let abc = ab.cross(ac);
    let acd = ac.cross(ad);
    let adb = ad.cross(ab);

    if abc.dot(ao) > 0.0 {
        simplex.set(&[a, b, c]);
        return do_simplex_triangle(simplex, direction);
    }
    if acd.dot(ao) > 0.0 {
        simplex.set(&[a, c, d]);
        return do_simplex_triangle(simplex, direction);
    }
    if adb.dot(ao) > 0.0 {
        simplex.set(&[a, d, b]);
        return do_simplex_triangle(simplex, direction);
    }

    // Origin is inside the tetrahedron
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere_at(center: Vec3, radius: f32) -> WorldShape {
        WorldShape {
            translation: center,
            rotation: Quat::IDENTITY,
            kind: ShapeKind::Sphere { radius },
        }
    }

    #[test]
    fn test_spheres_overlapping() {
        let a = sphere_at(Vec3::ZERO, 1.0);
        let b = sphere_at(Vec3::new(1.5, 0.0, 0.0), 1.0);
        assert!(gjk_intersects(&a, &b));
    }

    #[test]
    fn test_spheres_separated() {
        let a = sphere_at(Vec3::ZERO, 1.0);
        let b = sphere_at(Vec3::new(3.0, 0.0, 0.0), 1.0);
        assert!(!gjk_intersects(&a, &b));
    }

    #[test]
    fn test_boxes_overlapping() {
        let a = WorldShape {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            kind: ShapeKind::Box {
                half_extents: Vec3::ONE,
            },
        };
        let b = WorldShape {
            translation: Vec3::new(1.5, 0.0, 0.0),
            rotation: Quat::from_rotation_z(0.7),
            kind: ShapeKind::Box {
                half_extents: Vec3::ONE,
            },
        };
        assert!(gjk_intersects(&a, &b));
    }

    #[test]
    fn test_boxes_separated() {
        let a = WorldShape {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            kind: ShapeKind::Box {
                half_extents: Vec3::ONE,
            },
        };
        let b = WorldShape {
            translation: Vec3::new(5.0, 0.0, 0.0),
            rotation: Quat::IDENTITY,
            kind: ShapeKind::Box {
                half_extents: Vec3::ONE,
            },
        };
        assert!(!gjk_intersects(&a, &b));
    }

    #[test]
    fn test_capsule_sphere_overlap() {
        // Capsule along Z from -1 to 1 with radius 0.5
        let capsule = WorldShape {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            kind: ShapeKind::Capsule {
                radius: 0.5,
                half_length: 1.0,
            },
        };
        let near = sphere_at(Vec3::new(0.8, 0.0, 0.9), 0.5);
        let far = sphere_at(Vec3::new(0.0, 0.0, 3.0), 0.5);
        assert!(gjk_intersects(&capsule, &near));
        assert!(!gjk_intersects(&capsule, &far));
    }

    #[test]
    fn test_aggregates_overlap() {
        let geom_a =
            AggregateGeometry::from_shapes(vec![CollisionShape::sphere(Vec3::ZERO, 1.0)]);
        let geom_b = AggregateGeometry::from_shapes(vec![CollisionShape::sphere(
            Vec3::new(0.0, 0.0, 1.0),
            1.0,
        )]);
        // Shape offset puts B's sphere at z=1.5, well inside A's
        assert!(aggregates_overlap(
            Vec3::ZERO,
            Quat::IDENTITY,
            &geom_a,
            Vec3::new(0.0, 0.0, 0.5),
            Quat::IDENTITY,
            &geom_b,
        ));
        // Moving B far away separates them
        assert!(!aggregates_overlap(
            Vec3::ZERO,
            Quat::IDENTITY,
            &geom_a,
            Vec3::new(0.0, 0.0, 10.0),
            Quat::IDENTITY,
            &geom_b,
        ));
    }
}
