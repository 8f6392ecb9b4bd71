//! High-level scene loading.
//!
//! Converts a parsed [`SceneDescription`] into a [`Scene`]: materials and
//! lights first, then the object hierarchy top-down (so every parent's
//! global transform is final before its children are attached), then
//! material resolution and the camera.

use std::path::Path;

use glint_math::Vec3;
use thiserror::Error;

use crate::camera::{Camera, CameraError};
use crate::description::types::{
    CameraDescription, LightDescription, MaterialDescription, ObjectDescription, SceneDescription,
};
use crate::graph::GraphError;
use crate::light::Light;
use crate::material::{Blinn, Material};
use crate::node::{NodeId, SceneNode};
use crate::scene::{Scene, SceneError};
use crate::Color;

/// Direction and position used by lights that omit them.
const DEFAULT_LIGHT_VECTOR: Vec3 = Vec3::X;

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported object type '{kind}' on object '{name}'")]
    UnsupportedObject { name: String, kind: String },

    #[error("Unsupported light type '{kind}' on light '{name}'")]
    UnsupportedLight { name: String, kind: String },

    #[error("Unsupported material type '{kind}' on material '{name}'")]
    UnsupportedMaterial { name: String, kind: String },

    #[error("Invalid camera: {0}")]
    Camera(#[from] CameraError),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

impl From<GraphError> for LoadError {
    fn from(err: GraphError) -> Self {
        LoadError::Scene(SceneError::Graph(err))
    }
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a scene file.
///
/// The scene is named after the file stem.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<Scene> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");

    log::info!("Start parsing scene '{}'", path.display());
    let source = std::fs::read_to_string(path)?;
    let scene = load_scene_from_str(&source, name)?;
    log::info!("Parsing scene '{}' succeeded", path.display());

    Ok(scene)
}

/// Load a scene from a JSON string.
pub fn load_scene_from_str(source: &str, name: &str) -> LoadResult<Scene> {
    let description: SceneDescription = serde_json::from_str(source)?;
    build_scene(&description, name)
}

/// Convert a parsed description into a scene.
pub fn build_scene(description: &SceneDescription, name: &str) -> LoadResult<Scene> {
    let mut scene = Scene::new(name);

    for (index, material) in description.materials.iter().enumerate() {
        scene.add_material(convert_material(material, index)?)?;
    }

    for (index, light) in description.lights.iter().enumerate() {
        scene.add_light(convert_light(light, index)?);
    }

    let root = scene.graph.root();
    let mut counter = 0;
    for object in &description.objects {
        add_object(&mut scene, root, object, &mut counter)?;
    }

    scene.resolve_materials()?;

    scene.camera = match &description.camera {
        Some(camera) => convert_camera(camera)?,
        None => {
            log::warn!("Scene '{}' doesn't contain a camera. Using the default one", name);
            Camera::default()
        }
    };

    if let Some(config) = &description.render {
        scene.config = config.clone();
    }

    if scene.graph.is_empty() {
        log::warn!("Scene '{}' doesn't contain any objects", name);
    }
    if scene.lights.is_empty() {
        log::warn!("Scene '{}' doesn't contain any lights", name);
    }

    log::debug!(
        "Scene '{}': {} nodes, {} materials, {} lights",
        name,
        scene.graph.len(),
        scene.materials().len(),
        scene.lights.len()
    );

    Ok(scene)
}

/// Add an object and its subtree under `parent`.
///
/// The node is attached (and its transforms computed) before any child, so
/// children always see a finished parent transform.
fn add_object(
    scene: &mut Scene,
    parent: NodeId,
    object: &ObjectDescription,
    counter: &mut usize,
) -> LoadResult<NodeId> {
    let name = object.name.clone().unwrap_or_else(|| {
        let generated = format!("object_{}", counter);
        log::warn!("Object without a name, using '{}'", generated);
        generated
    });
    *counter += 1;

    let mut node = match object.kind.as_deref() {
        Some("sphere") => SceneNode::sphere(&name),
        Some("group") => SceneNode::group(&name),
        Some(other) => {
            return Err(LoadError::UnsupportedObject {
                name,
                kind: other.to_string(),
            })
        }
        None => {
            log::warn!("Object '{}' has no type, treating it as a group", name);
            SceneNode::group(&name)
        }
    };

    if object.scale.is_none() || object.rotate.is_none() || object.translate.is_none() {
        log::warn!("Doesn't see all transforms of object '{}'. Using default values", name);
    }

    let scale = object.scale.map(|s| s.to_vec3()).unwrap_or(Vec3::ONE);
    let rotate = object.rotate.unwrap_or(Vec3::ZERO);
    let translate = object.translate.unwrap_or(Vec3::ZERO);
    node = node.with_srt(scale, to_radians(rotate), translate);

    if let Some(material) = &object.material {
        node = node.with_material(material.clone());
    }

    let id = scene.graph.add_node(parent, node)?;
    for child in &object.children {
        add_object(scene, id, child, counter)?;
    }

    Ok(id)
}

fn convert_material(material: &MaterialDescription, index: usize) -> LoadResult<Material> {
    let name = material.name.clone().unwrap_or_else(|| {
        let generated = format!("material_{}", index);
        log::warn!("Material without a name, using '{}'", generated);
        generated
    });

    match material.kind.as_deref() {
        Some("blinn") => {}
        Some(other) => {
            return Err(LoadError::UnsupportedMaterial {
                name,
                kind: other.to_string(),
            })
        }
        None => log::warn!("Material '{}' has no type, treating it as blinn", name),
    }

    if material.diffuse.is_none() || material.specular.is_none() || material.glossiness.is_none() {
        log::warn!("Doesn't see all properties of blinn material '{}'. Using default values", name);
    }

    let defaults = Blinn::default();

    Ok(Material::blinn(
        name,
        material.diffuse.unwrap_or(defaults.diffuse),
        material.specular.unwrap_or(defaults.specular),
        material.glossiness.unwrap_or(defaults.glossiness),
    ))
}

fn convert_light(light: &LightDescription, index: usize) -> LoadResult<Light> {
    let name = light.name.clone().unwrap_or_else(|| {
        let generated = format!("light_{}", index);
        log::warn!("Light without a name, using '{}'", generated);
        generated
    });

    let intensity = match light.intensity {
        Some(intensity) => intensity.to_vec3(),
        None => {
            log::warn!("Light '{}' has no intensity. Using 1", name);
            Color::ONE
        }
    };

    match light.kind.as_deref() {
        Some("ambient") => Ok(Light::ambient(name, intensity)),
        Some("direct") | Some("directional") => {
            let direction = light.direction.unwrap_or_else(|| {
                log::warn!("Directional light '{}' has no direction. Using default", name);
                DEFAULT_LIGHT_VECTOR
            });
            Ok(Light::directional(name, intensity, direction))
        }
        Some("point") => {
            let position = light.position.unwrap_or_else(|| {
                log::warn!("Point light '{}' has no position. Using default", name);
                DEFAULT_LIGHT_VECTOR
            });
            Ok(Light::point(name, intensity, position))
        }
        Some(other) => Err(LoadError::UnsupportedLight {
            name,
            kind: other.to_string(),
        }),
        None => {
            log::warn!("Light '{}' has no type, treating it as ambient", name);
            Ok(Light::ambient(name, intensity))
        }
    }
}

fn convert_camera(camera: &CameraDescription) -> LoadResult<Camera> {
    let defaults = Camera::default();

    let position = camera.position.unwrap_or_else(|| {
        log::warn!("Does not find the camera's position. Using default");
        defaults.position()
    });
    let target = camera.target.unwrap_or_else(|| {
        log::warn!("Does not find the camera's target. Using default");
        defaults.target()
    });
    let up = camera.up.unwrap_or_else(|| {
        log::warn!("Does not find the camera's up direction. Using default");
        defaults.up()
    });
    let fov = camera.fov.unwrap_or_else(|| {
        log::warn!("Does not find the camera's fov. Using default");
        defaults.fov_y()
    });
    if camera.width.is_none() || camera.height.is_none() {
        log::warn!("Does not find the camera's resolution. Using default");
    }
    let width = camera.width.unwrap_or(defaults.width());
    let height = camera.height.unwrap_or(defaults.height());

    Ok(Camera::new(position, target, up, fov, width, height)?)
}

fn to_radians(degrees: Vec3) -> Vec3 {
    Vec3::new(degrees.x.to_radians(), degrees.y.to_radians(), degrees.z.to_radians())
}
