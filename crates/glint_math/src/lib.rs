// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod ray;
mod transform;

pub use ray::Ray;
pub use transform::{compose_srt, rotation_xyz, Mat4Ext};
