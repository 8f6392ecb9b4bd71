//! Surface materials.
//!
//! Materials are owned by the scene and shared by any number of geometric
//! nodes through a [`MaterialId`].

use serde::Deserialize;

use crate::Color;

/// Handle of a material inside a [`Scene`](crate::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub(crate) usize);

impl MaterialId {
    /// Position of the material in the scene's material list.
    pub fn index(self) -> usize {
        self.0
    }
}

/// How the Blinn specular half vector is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HalfVector {
    /// `normalize(reflect(incident, n) + n)`.
    ///
    /// This is the historical formula of this renderer. It ignores the
    /// view direction and is most likely a defect; it stays the default so
    /// existing scenes render unchanged.
    #[default]
    Reflected,
    /// The conventional bisector of the light and view directions.
    Bisector,
}

/// Blinn-type reflectance parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blinn {
    /// Diffuse color (RGB)
    pub diffuse: Color,

    /// Specular color (RGB)
    pub specular: Color,

    /// Specular exponent
    pub glossiness: f32,
}

impl Default for Blinn {
    fn default() -> Self {
        Self {
            diffuse: Color::splat(0.5),
            specular: Color::splat(0.7),
            glossiness: 20.0,
        }
    }
}

/// Kind-specific material data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialKind {
    Blinn(Blinn),
}

/// A named material.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Material name (referenced by nodes)
    pub name: String,

    /// Reflectance model and parameters
    pub kind: MaterialKind,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::from("default"),
            kind: MaterialKind::Blinn(Blinn::default()),
        }
    }
}

impl Material {
    /// Create a Blinn material.
    pub fn blinn(
        name: impl Into<String>,
        diffuse: Color,
        specular: Color,
        glossiness: f32,
    ) -> Self {
        Self {
            name: name.into(),
            kind: MaterialKind::Blinn(Blinn {
                diffuse,
                specular,
                glossiness,
            }),
        }
    }
}
