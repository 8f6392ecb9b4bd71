//! Arena-backed scene graph.
//!
//! Nodes are owned by the graph and addressed by [`NodeId`]. Ownership flows
//! from the root to the children; parent links are plain handles used for
//! transform lookup. Dropping the graph drops every node at once.

use std::collections::VecDeque;

use glint_math::{Mat4, Vec3};
use thiserror::Error;

use crate::node::{NodeId, NodeKind, SceneNode};

/// Errors raised by graph edits.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Unknown node handle: {0:?}")]
    UnknownNode(NodeId),

    #[error("A scene graph has exactly one root; cannot add root node '{0}'")]
    SecondRoot(String),
}

/// A single-rooted tree of scene nodes.
#[derive(Clone, Debug)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Create a graph holding only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![SceneNode::new("root", NodeKind::Root)],
        }
    }

    /// Handle of the root node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the graph holds nothing but the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Get a node by handle.
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    /// Get a node by handle mutably.
    ///
    /// The SRT is not reachable this way; use [`SceneGraph::set_transform`].
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0)
    }

    /// Find the first node with the given name (breadth-first).
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.breadth_first(self.root())
            .into_iter()
            .find(|&id| self.nodes[id.0].name == name)
    }

    /// Iterate over all nodes with their handles, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    /// Attach a node under `parent` and compute its transforms.
    ///
    /// The parent's global transform is already final, so the new node's
    /// global transform is valid on return.
    pub fn add_node(&mut self, parent: NodeId, mut node: SceneNode) -> Result<NodeId, GraphError> {
        if parent.0 >= self.nodes.len() {
            return Err(GraphError::UnknownNode(parent));
        }
        if node.kind == NodeKind::Root {
            return Err(GraphError::SecondRoot(node.name));
        }

        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        node.children.clear();
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);

        self.update_local_transform(id)?;
        self.update_global_transform(id)?;
        Ok(id)
    }

    /// Replace a node's SRT and refresh the transforms of its subtree.
    pub fn set_transform(
        &mut self,
        id: NodeId,
        scale: Vec3,
        rotate: Vec3,
        translate: Vec3,
    ) -> Result<(), GraphError> {
        let node = self.nodes.get_mut(id.0).ok_or(GraphError::UnknownNode(id))?;
        node.scale = scale;
        node.rotate = rotate;
        node.translate = translate;

        self.update_local_transform(id)?;
        self.propagate(id)
    }

    /// Recompute a node's local transform from its SRT fields.
    pub fn update_local_transform(&mut self, id: NodeId) -> Result<(), GraphError> {
        let node = self.nodes.get_mut(id.0).ok_or(GraphError::UnknownNode(id))?;
        node.local = node.compose_local();
        Ok(())
    }

    /// Recompute a node's global transform from its parent's global
    /// transform and its own local transform.
    ///
    /// The parent must already be up to date.
    pub fn update_global_transform(&mut self, id: NodeId) -> Result<(), GraphError> {
        let node = self.nodes.get(id.0).ok_or(GraphError::UnknownNode(id))?;
        let global = match node.parent {
            Some(parent) => self.nodes[parent.0].global * node.local,
            None => node.local,
        };
        self.nodes[id.0].global = global;
        Ok(())
    }

    /// Recompute every local and global transform, root first.
    pub fn update_transforms(&mut self) {
        for id in self.breadth_first(self.root()) {
            let local = self.nodes[id.0].compose_local();
            let parent_global = self.nodes[id.0].parent.map(|parent| self.nodes[parent.0].global);

            let node = &mut self.nodes[id.0];
            node.local = local;
            node.global = match parent_global {
                Some(parent_global) => parent_global * local,
                None => local,
            };
        }
    }

    /// Refresh global transforms of `id` and all of its descendants.
    fn propagate(&mut self, id: NodeId) -> Result<(), GraphError> {
        for node in self.breadth_first(id) {
            self.update_global_transform(node)?;
        }
        Ok(())
    }

    /// Handles of `start` and its descendants in breadth-first order.
    ///
    /// Every parent appears before its children, which is the order
    /// transforms must be computed in.
    pub fn breadth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        if start.0 >= self.nodes.len() {
            return order;
        }

        let mut queue = VecDeque::from([start]);
        while let Some(id) = queue.pop_front() {
            order.push(id);
            queue.extend(self.nodes[id.0].children.iter().copied());
        }
        order
    }

    /// Handles of every geometric node reachable from the root,
    /// breadth-first.
    pub fn geometric_nodes(&self) -> Vec<NodeId> {
        self.breadth_first(self.root())
            .into_iter()
            .filter(|&id| self.nodes[id.0].geometry().is_some())
            .collect()
    }

    /// World transform of a node, `None` for unknown handles.
    pub fn global_transform(&self, id: NodeId) -> Option<Mat4> {
        self.node(id).map(|node| node.global)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::{compose_srt, Mat4Ext};
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_new_graph_has_root() {
        let graph = SceneGraph::new();
        assert_eq!(graph.len(), 1);
        assert!(graph.is_empty());

        let root = graph.node(graph.root()).unwrap();
        assert_eq!(root.kind, NodeKind::Root);
        assert!(root.parent().is_none());
        assert_eq!(root.global_transform(), Mat4::IDENTITY);
    }

    #[test]
    fn test_child_global_is_parent_times_local() {
        let mut graph = SceneGraph::new();
        let parent = graph
            .add_node(
                graph.root(),
                SceneNode::group("parent").with_srt(
                    Vec3::splat(2.0),
                    Vec3::ZERO,
                    Vec3::new(0.0, 0.0, 5.0),
                ),
            )
            .unwrap();
        let child = graph
            .add_node(parent, SceneNode::sphere("child").with_translation(Vec3::new(1.0, 0.0, 0.0)))
            .unwrap();

        let parent_node = graph.node(parent).unwrap();
        let child_node = graph.node(child).unwrap();
        assert_eq!(
            child_node.global_transform(),
            parent_node.global_transform() * child_node.local_transform()
        );

        // Child offset is scaled by the parent then translated
        let center = child_node.global_transform().translation();
        assert!((center - Vec3::new(2.0, 0.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn test_update_global_is_idempotent() {
        let mut graph = SceneGraph::new();
        let parent = graph
            .add_node(
                graph.root(),
                SceneNode::group("p")
                    .with_srt(Vec3::splat(1.5), Vec3::new(0.1, 0.2, 0.3), Vec3::ONE),
            )
            .unwrap();
        let child = graph
            .add_node(parent, SceneNode::sphere("c").with_translation(Vec3::new(0.0, 2.0, 0.0)))
            .unwrap();

        graph.update_global_transform(child).unwrap();
        let first = graph.global_transform(child).unwrap();
        graph.update_global_transform(child).unwrap();
        let second = graph.global_transform(child).unwrap();

        assert_eq!(first.to_cols_array(), second.to_cols_array());
    }

    #[test]
    fn test_set_transform_propagates_to_descendants() {
        let mut graph = SceneGraph::new();
        let parent = graph.add_node(graph.root(), SceneNode::group("p")).unwrap();
        let child = graph
            .add_node(parent, SceneNode::group("c").with_translation(Vec3::X))
            .unwrap();
        let grandchild = graph
            .add_node(child, SceneNode::sphere("g").with_translation(Vec3::X))
            .unwrap();

        graph
            .set_transform(
                parent,
                Vec3::ONE,
                Vec3::new(0.0, 0.0, FRAC_PI_2),
                Vec3::new(0.0, 0.0, 3.0),
            )
            .unwrap();

        // Two units along +X, rotated onto +Y, lifted by 3 in Z
        let p = graph.global_transform(grandchild).unwrap().translation();
        assert!((p - Vec3::new(0.0, 2.0, 3.0)).length() < 1e-5);
    }

    #[test]
    fn test_update_transforms_recomputes_from_srt() {
        let mut graph = SceneGraph::new();
        let a = graph.add_node(graph.root(), SceneNode::group("a")).unwrap();
        let b = graph.add_node(a, SceneNode::sphere("b")).unwrap();

        // Edit the SRT without refreshing, then rebuild everything
        graph.nodes[a.0].translate = Vec3::new(0.0, 4.0, 0.0);
        graph.update_transforms();

        let p = graph.global_transform(b).unwrap().translation();
        assert_eq!(p, Vec3::new(0.0, 4.0, 0.0));
    }

    #[test]
    fn test_set_transform_keeps_every_global_in_sync() {
        let mut graph = SceneGraph::new();
        let a = graph.add_node(graph.root(), SceneNode::group("a")).unwrap();
        let b = graph
            .add_node(a, SceneNode::group("b").with_translation(Vec3::Y))
            .unwrap();
        graph.add_node(b, SceneNode::sphere("c").with_uniform_scale(2.0)).unwrap();

        let translate = Vec3::new(0.0, 0.0, 9.0);
        graph.set_transform(a, Vec3::ONE, Vec3::ZERO, translate).unwrap();

        let node = graph.node(a).unwrap();
        assert_eq!(node.translate(), translate);
        assert_eq!(node.global_transform().translation(), translate);

        for (_, node) in graph.iter() {
            let local = compose_srt(node.scale(), node.rotate(), node.translate());
            let expected = match node.parent() {
                Some(parent) => graph.node(parent).unwrap().global_transform() * local,
                None => local,
            };
            assert_eq!(node.local_transform(), local);
            assert_eq!(node.global_transform(), expected);
        }
    }

    #[test]
    fn test_unknown_parent_is_rejected() {
        let mut graph = SceneGraph::new();
        let err = graph.add_node(NodeId(7), SceneNode::sphere("orphan")).unwrap_err();
        assert_eq!(err, GraphError::UnknownNode(NodeId(7)));
    }

    #[test]
    fn test_second_root_is_rejected() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let err = graph.add_node(root, SceneNode::new("again", NodeKind::Root)).unwrap_err();
        assert!(matches!(err, GraphError::SecondRoot(_)));
    }

    #[test]
    fn test_breadth_first_order_and_geometry_filter() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let a = graph.add_node(root, SceneNode::sphere("a")).unwrap();
        let b = graph.add_node(root, SceneNode::group("b")).unwrap();
        let a1 = graph.add_node(a, SceneNode::sphere("a1")).unwrap();
        let b1 = graph.add_node(b, SceneNode::sphere("b1")).unwrap();

        assert_eq!(graph.breadth_first(root), vec![root, a, b, a1, b1]);
        assert_eq!(graph.geometric_nodes(), vec![a, a1, b1]);
        assert_eq!(graph.find("b1"), Some(b1));
        assert_eq!(graph.find("missing"), None);
    }
}
