//! JSON scene description support.
//!
//! A scene file mirrors the scene graph directly: nested `objects` with
//! SRT fields, named `materials`, `lights`, one `camera` and an optional
//! `render` section.
//!
//! Missing properties are replaced by defaults with a warning. Unsupported
//! object, light or material types, unresolved material names and invalid
//! cameras reject the whole file.
//!
//! # Example
//!
//! ```ignore
//! use glint_core::description::load_scene;
//!
//! let scene = load_scene("path/to/scene.json")?;
//! println!("Loaded {} spheres", scene.geometry_count());
//! ```

mod loader;
mod types;

pub use loader::*;
pub use types::*;
