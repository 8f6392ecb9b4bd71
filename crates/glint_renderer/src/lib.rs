//! Glint Renderer - CPU ray tracing
//!
//! Casts one or more primary rays per pixel, finds the nearest sphere hit
//! with a linear scan over the flattened scene graph, and shades it with
//! ambient, directional and point lights.

mod bucket;
mod intersect;
mod primitive;
mod renderer;
mod sampler;
mod shading;
mod tree;

pub use bucket::{generate_buckets, render_bucket, render_parallel, Bucket, BucketResult};
pub use intersect::{ray_sphere, Hit};
pub use primitive::{Primitive, Shape, SphereShape};
pub use renderer::{color_to_rgb8, render, render_pixel, ImageBuffer, PreparedScene};
pub use sampler::{SampleGrid, MAX_SAMPLES_PER_PIXEL};
pub use shading::{reflect, Shader};
pub use tree::{SceneHit, Tree};

/// Re-export common types from glint_core and glint_math
pub use glint_core::{Color, RenderConfig, Scene};
pub use glint_math::{Ray, Vec3};
