//! Flattened scene aggregate for ray queries.
//!
//! The tree is built once the graph and its transforms are final. It does
//! not observe later graph edits: rebuild it after changing geometry.

use glint_core::{NodeId, SceneGraph};
use glint_math::Ray;

use crate::intersect::Hit;
use crate::primitive::{Primitive, Shape, SphereShape};

/// A hit together with the node that was hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneHit {
    pub node: NodeId,
    pub hit: Hit,
}

/// Flat list of every geometric node reachable from the root.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    primitives: Vec<Primitive>,
}

impl Tree {
    /// Collect the geometric nodes of a graph, breadth-first.
    pub fn new(graph: &SceneGraph) -> Self {
        let primitives: Vec<Primitive> = graph
            .geometric_nodes()
            .into_iter()
            .filter_map(|id| {
                let node = graph.node(id)?;
                let geometry = node.geometry()?;
                let shape = Shape::new(geometry, node.global_transform());

                match shape {
                    Shape::Sphere(SphereShape::Transformed { .. }) => log::warn!(
                        "Sphere '{}' has non-uniform scale; intersecting it in object space",
                        node.name
                    ),
                    Shape::Sphere(SphereShape::Degenerate) => log::warn!(
                        "Sphere '{}' has a singular transform and will never be hit",
                        node.name
                    ),
                    Shape::Sphere(SphereShape::Uniform { .. }) => {}
                }

                Some(Primitive { node: id, shape })
            })
            .collect();

        log::debug!("Tree built with {} primitives", primitives.len());
        Self { primitives }
    }

    /// Number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Primitives in traversal order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Nearest hit along the ray over all primitives.
    ///
    /// Ties keep the primitive that comes first in traversal order.
    pub fn intersect(&self, ray: &Ray) -> Option<SceneHit> {
        let mut closest: Option<SceneHit> = None;

        for primitive in &self.primitives {
            if let Some(hit) = primitive.shape.intersect(ray) {
                if closest.map_or(true, |c| hit.t < c.hit.t) {
                    closest = Some(SceneHit {
                        node: primitive.node,
                        hit,
                    });
                }
            }
        }

        closest
    }

    /// First hit in traversal order, which is not necessarily the nearest.
    ///
    /// Legacy behaviour kept for comparison; it is wrong for overlapping
    /// primitives and the renderer does not use it.
    pub fn intersect_first(&self, ray: &Ray) -> Option<SceneHit> {
        self.primitives.iter().find_map(|primitive| {
            primitive.shape.intersect(ray).map(|hit| SceneHit {
                node: primitive.node,
                hit,
            })
        })
    }
}
