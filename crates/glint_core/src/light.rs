//! Light sources.

use glint_math::Vec3;
use serde::Deserialize;

use crate::Color;

/// Whether a directional or point light's intensity scales its
/// contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightIntensity {
    /// `ndotl * diffuse + spec * specular`, independent of the light's
    /// intensity. Ambient lights still return their intensity.
    #[default]
    Unweighted,
    /// The contribution is multiplied channel-wise by the intensity.
    Weighted,
}

/// Kind-specific light data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Constant light reaching every point from every direction
    Ambient,
    /// Parallel light travelling along `direction`
    Directional { direction: Vec3 },
    /// Light emitted from a single world-space point
    Point { position: Vec3 },
}

/// A light owned by the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Light name (from the scene description)
    pub name: String,

    /// RGB intensity
    pub intensity: Color,

    /// Light kind
    pub kind: LightKind,
}

impl Light {
    /// Create an ambient light.
    pub fn ambient(name: impl Into<String>, intensity: Color) -> Self {
        Self {
            name: name.into(),
            intensity,
            kind: LightKind::Ambient,
        }
    }

    /// Create a directional light. `direction` is the direction the light travels.
    pub fn directional(name: impl Into<String>, intensity: Color, direction: Vec3) -> Self {
        Self {
            name: name.into(),
            intensity,
            kind: LightKind::Directional { direction },
        }
    }

    /// Create a point light.
    pub fn point(name: impl Into<String>, intensity: Color, position: Vec3) -> Self {
        Self {
            name: name.into(),
            intensity,
            kind: LightKind::Point { position },
        }
    }

    /// True for ambient lights.
    pub fn is_ambient(&self) -> bool {
        matches!(self.kind, LightKind::Ambient)
    }

    /// Unit direction of the light arriving at `position`, pointing from
    /// the light toward the surface.
    ///
    /// Ambient lights have no direction. A zero vector is returned for a
    /// directional light without a direction or a point light sitting on
    /// the surface point.
    pub fn incident(&self, position: Vec3) -> Option<Vec3> {
        match self.kind {
            LightKind::Ambient => None,
            LightKind::Directional { direction } => Some(direction.normalize_or_zero()),
            LightKind::Point { position: light } => Some((position - light).normalize_or_zero()),
        }
    }
}
