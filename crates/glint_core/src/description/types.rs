//! Serialized scene types.
//!
//! These types mirror the JSON document before conversion to a [`Scene`](crate::Scene).
//! Every field is optional so that the loader can report and default
//! missing values instead of failing.

use glint_math::Vec3;
use serde::Deserialize;

use crate::config::RenderConfig;

/// A whole scene file.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SceneDescription {
    /// Top-level objects, children of the root
    #[serde(default)]
    pub objects: Vec<ObjectDescription>,

    #[serde(default)]
    pub materials: Vec<MaterialDescription>,

    #[serde(default)]
    pub lights: Vec<LightDescription>,

    pub camera: Option<CameraDescription>,

    pub render: Option<RenderConfig>,
}

/// A scene object and its subtree.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ObjectDescription {
    pub name: Option<String>,

    /// `"sphere"` or `"group"`
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Material name
    pub material: Option<String>,

    pub scale: Option<ScaleDescription>,

    /// XYZ Euler angles in degrees
    pub rotate: Option<Vec3>,

    pub translate: Option<Vec3>,

    #[serde(default)]
    pub children: Vec<ObjectDescription>,
}

/// Scale as a single uniform factor or per axis.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScaleDescription {
    Uniform(f32),
    PerAxis(Vec3),
}

impl ScaleDescription {
    pub fn to_vec3(self) -> Vec3 {
        match self {
            ScaleDescription::Uniform(s) => Vec3::splat(s),
            ScaleDescription::PerAxis(v) => v,
        }
    }
}

/// A material definition.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MaterialDescription {
    pub name: Option<String>,

    /// `"blinn"`
    #[serde(rename = "type")]
    pub kind: Option<String>,

    pub diffuse: Option<Vec3>,

    pub specular: Option<Vec3>,

    pub glossiness: Option<f32>,
}

/// A light definition.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LightDescription {
    pub name: Option<String>,

    /// `"ambient"`, `"direct"` or `"point"`
    #[serde(rename = "type")]
    pub kind: Option<String>,

    pub intensity: Option<IntensityDescription>,

    /// Travel direction, directional lights only
    pub direction: Option<Vec3>,

    /// World position, point lights only
    pub position: Option<Vec3>,
}

/// Light intensity as a grey scalar or an RGB triple.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IntensityDescription {
    Scalar(f32),
    Rgb(Vec3),
}

impl IntensityDescription {
    pub fn to_vec3(self) -> Vec3 {
        match self {
            IntensityDescription::Scalar(s) => Vec3::splat(s),
            IntensityDescription::Rgb(v) => v,
        }
    }
}

/// The camera definition.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CameraDescription {
    pub position: Option<Vec3>,

    pub target: Option<Vec3>,

    pub up: Option<Vec3>,

    /// Vertical field of view in degrees
    pub fov: Option<f32>,

    pub width: Option<u32>,

    pub height: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_forms() {
        let uniform: ScaleDescription = serde_json::from_str("2.0").unwrap();
        let per_axis: ScaleDescription = serde_json::from_str("[1.0, 2.0, 3.0]").unwrap();

        assert_eq!(uniform.to_vec3(), Vec3::splat(2.0));
        assert_eq!(per_axis.to_vec3(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_intensity_forms() {
        let grey: IntensityDescription = serde_json::from_str("0.2").unwrap();
        let rgb: IntensityDescription = serde_json::from_str("[1.0, 0.5, 0.0]").unwrap();

        assert_eq!(grey.to_vec3(), Vec3::splat(0.2));
        assert_eq!(rgb.to_vec3(), Vec3::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn test_nested_objects() {
        let json = r#"{
            "objects": [
                { "name": "parent", "type": "group", "children": [
                    { "name": "child", "type": "sphere", "translate": [0, 1, 0] }
                ]}
            ]
        }"#;
        let description: SceneDescription = serde_json::from_str(json).unwrap();

        assert_eq!(description.objects.len(), 1);
        let child = &description.objects[0].children[0];
        assert_eq!(child.kind.as_deref(), Some("sphere"));
        assert_eq!(child.translate, Some(Vec3::new(0.0, 1.0, 0.0)));
        assert!(description.camera.is_none());
    }
}
