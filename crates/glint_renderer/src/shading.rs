//! Local Blinn-type shading.
//!
//! Only direct light is evaluated: there are no shadow rays and no
//! secondary bounces.

use glint_core::{
    Blinn, Color, HalfVector, Light, LightIntensity, LightKind, Material, MaterialKind,
    RenderConfig,
};
use glint_math::Vec3;

/// Reflect `v` about the unit normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Evaluates lights against a material at a surface point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Shader {
    pub half_vector: HalfVector,
    pub light_intensity: LightIntensity,
}

impl Shader {
    pub fn new(half_vector: HalfVector) -> Self {
        Self {
            half_vector,
            light_intensity: LightIntensity::default(),
        }
    }

    /// Shader using the shading policies of a render configuration.
    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.half_vector).with_light_intensity(config.light_intensity)
    }

    pub fn with_light_intensity(mut self, light_intensity: LightIntensity) -> Self {
        self.light_intensity = light_intensity;
        self
    }

    /// Contribution of one light.
    ///
    /// `incident` points from the light toward the surface, `view` points
    /// from the surface toward the eye and `normal` is the outward unit
    /// normal. Ambient lights return their intensity unchanged.
    pub fn shade(
        &self,
        light: &Light,
        incident: Vec3,
        view: Vec3,
        normal: Vec3,
        material: &Material,
    ) -> Color {
        if let LightKind::Ambient = light.kind {
            return light.intensity;
        }

        let color = match material.kind {
            MaterialKind::Blinn(blinn) => self.blinn(&blinn, incident, view, normal),
        };

        match self.light_intensity {
            LightIntensity::Unweighted => color,
            LightIntensity::Weighted => color * light.intensity,
        }
    }

    /// Sum of every light's contribution at `position`.
    pub fn shade_point(
        &self,
        lights: &[Light],
        material: &Material,
        position: Vec3,
        normal: Vec3,
        view: Vec3,
    ) -> Color {
        lights
            .iter()
            .map(|light| {
                let incident = light.incident(position).unwrap_or(Vec3::ZERO);
                self.shade(light, incident, view, normal, material)
            })
            .fold(Color::ZERO, |acc, c| acc + c)
    }

    /// `ndotl * diffuse + (H . N)^glossiness * specular`.
    ///
    /// `ndotl` is clamped at zero, so a light behind the surface adds no
    /// diffuse term. The specular term is evaluated regardless.
    fn blinn(&self, blinn: &Blinn, incident: Vec3, view: Vec3, normal: Vec3) -> Color {
        let ndotl = (-incident.dot(normal)).max(0.0);

        let half = match self.half_vector {
            HalfVector::Reflected => (reflect(incident, normal) + normal).normalize_or_zero(),
            HalfVector::Bisector => (view - incident).normalize_or_zero(),
        };
        // Clamped so a negative base never reaches powf
        let specular = half.dot(normal.normalize_or_zero()).max(0.0).powf(blinn.glossiness);

        blinn.diffuse * ndotl + blinn.specular * specular
    }
}
