//! The scene container handed to the renderer.
//!
//! Owns the node graph, the camera, the lights and the materials. Nodes
//! refer to materials by name until [`Scene::resolve_materials`] links them
//! to material handles.

use std::collections::HashMap;

use thiserror::Error;

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::graph::{GraphError, SceneGraph};
use crate::light::Light;
use crate::material::{Material, MaterialId};
use crate::node::NodeId;

/// Errors raised while assembling a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Node '{node}' references unknown material '{material}'")]
    UnknownMaterial { node: String, material: String },

    #[error("Material '{0}' is defined more than once")]
    DuplicateMaterial(String),
}

/// A complete scene.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Scene name (usually from filename)
    pub name: String,

    /// Node hierarchy
    pub graph: SceneGraph,

    /// The camera rays are generated from
    pub camera: Camera,

    /// Lights, all of which contribute to every shaded point
    pub lights: Vec<Light>,

    /// Render settings carried with the scene
    pub config: RenderConfig,

    materials: Vec<Material>,
    material_names: HashMap<String, MaterialId>,
}

impl Scene {
    /// Create an empty scene with a default camera.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a material and return its handle. Names must be unique.
    pub fn add_material(&mut self, material: Material) -> Result<MaterialId, SceneError> {
        if self.material_names.contains_key(&material.name) {
            return Err(SceneError::DuplicateMaterial(material.name));
        }

        let id = MaterialId(self.materials.len());
        self.material_names.insert(material.name.clone(), id);
        self.materials.push(material);
        Ok(id)
    }

    /// Get a material by handle.
    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    /// Look up a material handle by name.
    pub fn material_id(&self, name: &str) -> Option<MaterialId> {
        self.material_names.get(name).copied()
    }

    /// All materials in insertion order.
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Add a light.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Material of a node; `None` if the node has no resolved material.
    pub fn node_material(&self, id: NodeId) -> Option<&Material> {
        self.graph
            .node(id)
            .and_then(|node| node.material())
            .and_then(|material| self.material(material))
    }

    /// Link every node's material name to a material handle.
    ///
    /// Must run after all materials are added. Nodes without a material
    /// name keep no material.
    pub fn resolve_materials(&mut self) -> Result<(), SceneError> {
        let ids: Vec<NodeId> = self.graph.iter().map(|(id, _)| id).collect();

        for id in ids {
            let Some(node) = self.graph.node_mut(id) else {
                continue;
            };
            let Some(name) = node.material_name.as_deref() else {
                node.material = None;
                continue;
            };

            match self.material_names.get(name) {
                Some(&material) => node.material = Some(material),
                None => {
                    return Err(SceneError::UnknownMaterial {
                        node: node.name.clone(),
                        material: name.to_string(),
                    })
                }
            }
        }
        Ok(())
    }

    /// Number of geometric nodes reachable from the root.
    pub fn geometry_count(&self) -> usize {
        self.graph.geometric_nodes().len()
    }
}
