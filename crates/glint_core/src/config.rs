//! Render configuration.

use serde::Deserialize;

use crate::light::LightIntensity;
use crate::material::HalfVector;
use crate::Color;

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Render configuration.
///
/// Deserializable from the `"render"` section of a scene file; every field
/// is optional there.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Samples per pixel, rounded up to a square grid
    pub samples_per_pixel: u32,
    /// Color of rays that hit nothing
    pub background: Color,
    /// Color written for a pixel whose shading produced a non-finite value
    pub fallback: Color,
    /// Specular half-vector formula
    pub half_vector: HalfVector,
    /// Whether light intensity scales directional and point contributions
    pub light_intensity: LightIntensity,
    /// Edge length of a render bucket in pixels
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 1,
            background: Color::ONE,
            fallback: Color::new(1.0, 0.0, 1.0),
            half_vector: HalfVector::default(),
            light_intensity: LightIntensity::default(),
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    /// Set samples per pixel.
    pub fn with_samples(mut self, samples_per_pixel: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self
    }

    /// Set background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Set the half-vector formula.
    pub fn with_half_vector(mut self, half_vector: HalfVector) -> Self {
        self.half_vector = half_vector;
        self
    }

    /// Set the light intensity policy.
    pub fn with_light_intensity(mut self, light_intensity: LightIntensity) -> Self {
        self.light_intensity = light_intensity;
        self
    }

    /// Set bucket size.
    pub fn with_bucket_size(mut self, bucket_size: u32) -> Self {
        self.bucket_size = bucket_size;
        self
    }
}
