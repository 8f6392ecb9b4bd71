//! Scene graph nodes.

use glint_math::{compose_srt, Mat4, Vec3};

use crate::material::MaterialId;

/// Handle of a node inside a [`SceneGraph`](crate::SceneGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the graph's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The primitive a geometric node renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    /// Unit sphere at the node's origin, placed by the global transform.
    Sphere,
}

/// Category of a scene node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The single root of a scene graph
    Root,
    /// Transform-only node
    Group,
    /// Node carrying a renderable primitive
    Geometry(Geometry),
}

/// A node of the scene graph.
///
/// The local SRT is canonical; `local` and `global` are derived from it.
/// Once a node is in a graph its SRT can only change through
/// [`SceneGraph::set_transform`](crate::SceneGraph::set_transform), which
/// recomputes the affected transforms.
#[derive(Clone, Debug)]
pub struct SceneNode {
    /// Node name (from the scene description)
    pub name: String,

    /// Node category
    pub kind: NodeKind,

    pub(crate) scale: Vec3,
    pub(crate) rotate: Vec3,
    pub(crate) translate: Vec3,

    /// Name of the material, resolved by the scene after loading
    pub material_name: Option<String>,

    pub(crate) material: Option<MaterialId>,
    pub(crate) local: Mat4,
    pub(crate) global: Mat4,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl SceneNode {
    /// Create a node with identity SRT.
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            scale: Vec3::ONE,
            rotate: Vec3::ZERO,
            translate: Vec3::ZERO,
            material_name: None,
            material: None,
            local: Mat4::IDENTITY,
            global: Mat4::IDENTITY,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Create a sphere node.
    pub fn sphere(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Geometry(Geometry::Sphere))
    }

    /// Create a transform-only group node.
    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Group)
    }

    /// Set the local scale, rotation (radians) and translation.
    pub fn with_srt(mut self, scale: Vec3, rotate: Vec3, translate: Vec3) -> Self {
        self.scale = scale;
        self.rotate = rotate;
        self.translate = translate;
        self
    }

    /// Set the local translation only.
    pub fn with_translation(mut self, translate: Vec3) -> Self {
        self.translate = translate;
        self
    }

    /// Set a uniform local scale.
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Reference a material by name.
    pub fn with_material(mut self, name: impl Into<String>) -> Self {
        self.material_name = Some(name.into());
        self
    }

    /// The geometry of this node, if it is a geometric node.
    pub fn geometry(&self) -> Option<Geometry> {
        match self.kind {
            NodeKind::Geometry(geometry) => Some(geometry),
            NodeKind::Root | NodeKind::Group => None,
        }
    }

    /// Local scale.
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Local XYZ Euler rotation in radians.
    pub fn rotate(&self) -> Vec3 {
        self.rotate
    }

    /// Local translation.
    pub fn translate(&self) -> Vec3 {
        self.translate
    }

    /// Local transform matrix.
    pub fn local_transform(&self) -> Mat4 {
        self.local
    }

    /// Global (world) transform matrix.
    pub fn global_transform(&self) -> Mat4 {
        self.global
    }

    /// Parent handle; `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Resolved material handle.
    pub fn material(&self) -> Option<MaterialId> {
        self.material
    }

    /// Local transform computed from the current SRT fields.
    pub(crate) fn compose_local(&self) -> Mat4 {
        compose_srt(self.scale, self.rotate, self.translate)
    }
}
