//! Renderable primitives derived from geometric scene nodes.
//!
//! A primitive is computed once from a node's finalized global transform
//! and never changes; rebuild the [`Tree`](crate::Tree) after editing the
//! graph.

use glint_core::{Geometry, NodeId};
use glint_math::{Mat3, Mat4, Mat4Ext, Ray, Vec3};

use crate::intersect::{ray_sphere, Hit};

/// World-space sphere data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SphereShape {
    /// Similarity transform: intersected directly in world space.
    Uniform { center: Vec3, radius: f32 },
    /// Non-uniform scale or shear: the ray is moved into the sphere's
    /// object space and intersected with the unit sphere.
    Transformed {
        world_from_object: Mat4,
        object_from_world: Mat4,
        normal_matrix: Mat3,
    },
    /// Singular transform. Never hit.
    Degenerate,
}

impl SphereShape {
    /// Derive the world-space sphere of a unit sphere placed by `global`.
    pub fn from_transform(global: Mat4) -> Self {
        if let Some(radius) = global.uniform_scale() {
            return SphereShape::Uniform {
                center: global.translation(),
                radius,
            };
        }

        match global.normal_matrix() {
            Some(normal_matrix) => SphereShape::Transformed {
                world_from_object: global,
                object_from_world: global.inverse(),
                normal_matrix,
            },
            None => SphereShape::Degenerate,
        }
    }

    /// Intersect a world-space ray.
    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        match *self {
            SphereShape::Uniform { center, radius } => ray_sphere(ray, center, radius),
            SphereShape::Transformed {
                world_from_object,
                object_from_world,
                normal_matrix,
            } => {
                let local_ray = ray.transformed(&object_from_world);
                let local_hit = ray_sphere(&local_ray, Vec3::ZERO, 1.0)?;

                let position = world_from_object.transform_point3(local_hit.position);
                let normal = (normal_matrix * local_hit.normal).normalize_or_zero();
                let t = (position - ray.origin()).dot(ray.direction());
                Some(Hit { t, position, normal })
            }
            SphereShape::Degenerate => None,
        }
    }
}

/// Shape of a primitive, one variant per geometry kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere(SphereShape),
}

impl Shape {
    /// Build the shape for a geometry placed by a world transform.
    pub fn new(geometry: Geometry, global: Mat4) -> Self {
        match geometry {
            Geometry::Sphere => Shape::Sphere(SphereShape::from_transform(global)),
        }
    }

    /// Intersect a world-space ray.
    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        match self {
            Shape::Sphere(sphere) => sphere.intersect(ray),
        }
    }
}

/// A geometric node's shape together with the node it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    pub node: NodeId,
    pub shape: Shape,
}
