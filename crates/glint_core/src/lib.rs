//! Glint Core - Scene graph, lights, materials and camera for the Glint ray tracer.
//!
//! This crate provides:
//!
//! - **Scene graph types**: `SceneGraph`, `SceneNode`, `NodeId`
//! - **Shading inputs**: `Light`, `Material`
//! - **Camera**: image-plane basis and primary ray generation
//! - **Scene description**: JSON scene loading
//!
//! # Example
//!
//! ```ignore
//! use glint_core::description::load_scene;
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} nodes, {} lights",
//!     scene.graph.len(),
//!     scene.lights.len());
//! ```

pub mod camera;
pub mod config;
pub mod description;
pub mod graph;
pub mod light;
pub mod material;
pub mod node;
pub mod scene;

// Re-export commonly used types
pub use camera::{Camera, CameraError, ImagePlane, PrimaryRay, PrimaryRays};
pub use config::RenderConfig;
pub use description::{load_scene, load_scene_from_str, LoadError, LoadResult};
pub use graph::{GraphError, SceneGraph};
pub use light::{Light, LightIntensity, LightKind};
pub use material::{Blinn, HalfVector, Material, MaterialId, MaterialKind};
pub use node::{Geometry, NodeId, NodeKind, SceneNode};
pub use scene::{Scene, SceneError};

/// Color type alias (linear RGB, unbounded)
pub type Color = glint_math::Vec3;
