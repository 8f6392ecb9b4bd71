//! Sequential reference renderer.
//!
//! Implements local ray tracing with:
//! - Nearest-hit scene queries over the flattened graph
//! - Ambient, directional and point lights
//! - Regular-grid supersampling

use glint_core::{Color, Material, Scene};
use glint_math::Ray;

use crate::sampler::SampleGrid;
use crate::shading::Shader;
use crate::tree::Tree;

/// A scene frozen for rendering.
///
/// Holds the scene together with its flattened geometry, so it must be
/// rebuilt after any change to the graph. Shared read-only between render
/// threads.
#[derive(Debug, Clone)]
pub struct PreparedScene {
    scene: Scene,
    tree: Tree,
    shader: Shader,
    grid: SampleGrid,
    default_material: Material,
}

impl PreparedScene {
    pub fn new(scene: Scene) -> Self {
        let tree = Tree::new(&scene.graph);
        if tree.is_empty() {
            log::warn!("Scene '{}' has no geometry; every pixel is background", scene.name);
        }
        if scene.lights.is_empty() {
            log::warn!("Scene '{}' has no lights; every hit is black", scene.name);
        }

        let shader = Shader::from_config(&scene.config);
        let grid = SampleGrid::new(scene.config.samples_per_pixel);

        log::info!(
            "Prepared '{}': {} primitives, {} lights, {} materials, {} samples per pixel",
            scene.name,
            tree.len(),
            scene.lights.len(),
            scene.materials().len(),
            grid.len()
        );

        Self {
            scene,
            tree,
            shader,
            grid,
            default_material: Material::default(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn sample_grid(&self) -> &SampleGrid {
        &self.grid
    }

    /// Color seen along a ray.
    ///
    /// Misses return the background. A node without a material is shaded
    /// with the default material. A non-finite result is replaced by the
    /// fallback color.
    pub fn trace(&self, ray: &Ray) -> Color {
        let config = &self.scene.config;

        let Some(hit) = self.tree.intersect(ray) else {
            return config.background;
        };

        let material = self
            .scene
            .node_material(hit.node)
            .unwrap_or(&self.default_material);

        let color = self.shader.shade_point(
            &self.scene.lights,
            material,
            hit.hit.position,
            hit.hit.normal,
            -ray.direction(),
        );

        if color.is_finite() {
            color
        } else {
            log::debug!("Non-finite color {:?} at {:?}", color, hit.hit.position);
            config.fallback
        }
    }
}

/// Convert a color to 8-bit RGB, clamping each channel to [0, 1].
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let c = color.clamp(Color::ZERO, Color::ONE) * 255.0;
    [c.x as u8, c.y as u8, c.z as u8]
}

/// Render a single pixel, averaging its samples.
pub fn render_pixel(prepared: &PreparedScene, x: u32, y: u32) -> Color {
    let camera = &prepared.scene.camera;
    let grid = &prepared.grid;

    let sum = grid
        .offsets()
        .iter()
        .map(|&(dx, dy)| prepared.trace(&camera.unproject(x as f32 + dx, y as f32 + dy)))
        .fold(Color::ZERO, |acc, c| acc + c);

    sum / grid.len() as f32
}

/// Floating-point framebuffer, row-major with row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    /// Set the pixel at (x, y). Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Iterate `(x, y, color)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, Color)> + '_ {
        let width = self.width.max(1);
        self.pixels
            .iter()
            .enumerate()
            .map(move |(i, &c)| ((i as u32) % width, (i as u32) / width, c))
    }

    /// Convert to RGB bytes for saving.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*color));
        }
        bytes
    }
}

/// Render the whole image on the calling thread.
pub fn render(prepared: &PreparedScene) -> ImageBuffer {
    let camera = &prepared.scene.camera;
    let mut image = ImageBuffer::new(camera.width(), camera.height());

    if prepared.grid.len() == 1 {
        for primary in camera.rays() {
            image.set(primary.x, primary.y, prepared.trace(&primary.ray));
        }
    } else {
        for y in 0..camera.height() {
            for x in 0..camera.width() {
                image.set(x, y, render_pixel(prepared, x, y));
            }
        }
    }

    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::{Camera, HalfVector, Light, LightIntensity, SceneNode};
    use glint_math::Vec3;

    /// Unit sphere 5 units in front of a 9×9 camera, with one ambient light.
    fn sphere_scene() -> Scene {
        let mut scene = Scene::new("test");
        let root = scene.graph.root();
        scene
            .graph
            .add_node(
                root,
                SceneNode::sphere("ball")
                    .with_translation(Vec3::new(0.0, 0.0, -5.0))
                    .with_material("red"),
            )
            .unwrap();
        scene
            .add_material(Material::blinn("red", Color::new(1.0, 0.0, 0.0), Color::ZERO, 10.0))
            .unwrap();
        scene.resolve_materials().unwrap();
        scene.add_light(Light::ambient("amb", Color::splat(0.2)));
        let target = Vec3::new(0.0, 0.0, -5.0);
        scene.camera = Camera::new(Vec3::ZERO, target, Vec3::Y, 45.0, 9, 9).unwrap();
        scene.config = scene.config.clone().with_background(Color::new(0.0, 0.0, 1.0));
        scene
    }

    #[test]
    fn test_trace_hit_and_miss() {
        let prepared = PreparedScene::new(sphere_scene());

        let hit = prepared.trace(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0)));
        assert_eq!(hit, Color::splat(0.2));

        let miss = prepared.trace(&Ray::new(Vec3::ZERO, Vec3::Y));
        assert_eq!(miss, Color::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_directional_light_uses_node_material() {
        let mut scene = sphere_scene();
        scene.lights.clear();
        scene.add_light(Light::directional("sun", Color::ONE, Vec3::new(0.0, 0.0, -1.0)));
        let prepared = PreparedScene::new(scene);

        let c = prepared.trace(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0)));
        assert!((c - Color::new(1.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_missing_material_uses_default() {
        let mut scene = Scene::new("plain");
        let root = scene.graph.root();
        scene
            .graph
            .add_node(root, SceneNode::sphere("ball").with_translation(Vec3::new(0.0, 0.0, -5.0)))
            .unwrap();
        scene.add_light(Light::directional("sun", Color::ONE, Vec3::new(0.0, 0.0, -1.0)));
        let prepared = PreparedScene::new(scene);

        let c = prepared.trace(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0)));
        // Default Blinn: diffuse 0.5 plus full specular 0.7
        assert!((c - Color::splat(1.2)).length() < 1e-5);
    }

    #[test]
    fn test_non_finite_color_uses_fallback() {
        let mut scene = sphere_scene();
        scene.lights.clear();
        scene.add_light(Light::ambient("hot", Color::splat(f32::INFINITY)));
        let fallback = scene.config.fallback;
        let prepared = PreparedScene::new(scene);

        let c = prepared.trace(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0)));
        assert_eq!(c, fallback);
    }

    #[test]
    fn test_render_centre_and_corner() {
        let prepared = PreparedScene::new(sphere_scene());
        let image = render(&prepared);

        assert_eq!(image.width, 9);
        assert_eq!(image.pixels.len(), 81);
        assert_eq!(image.get(4, 4), Some(Color::splat(0.2)));
        assert_eq!(image.get(0, 0), Some(Color::new(0.0, 0.0, 1.0)));
        assert_eq!(image.get(9, 0), None);
    }

    #[test]
    fn test_supersampling_matches_single_sample_inside_sphere() {
        let mut scene = sphere_scene();
        scene.config = scene.config.clone().with_samples(4);
        let prepared = PreparedScene::new(scene);
        assert_eq!(prepared.sample_grid().len(), 4);

        let c = render_pixel(&prepared, 4, 4);
        assert!((c - Color::splat(0.2)).length() < 1e-5);
    }

    #[test]
    fn test_shading_policies_come_from_config() {
        let mut scene = sphere_scene();
        scene.lights.clear();
        scene.add_light(Light::directional("sun", Color::splat(3.0), Vec3::new(0.0, 0.0, -1.0)));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let unweighted = PreparedScene::new(scene.clone()).trace(&ray);
        assert!((unweighted - Color::new(1.0, 0.0, 0.0)).length() < 1e-5);

        scene.config = scene
            .config
            .clone()
            .with_half_vector(HalfVector::Bisector)
            .with_light_intensity(LightIntensity::Weighted);
        let prepared = PreparedScene::new(scene);
        assert_eq!(prepared.shader.half_vector, HalfVector::Bisector);
        assert!((prepared.trace(&ray) - Color::new(3.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_oversized_sample_count_is_clamped() {
        let mut scene = sphere_scene();
        scene.config = scene.config.clone().with_samples(u32::MAX);
        let prepared = PreparedScene::new(scene);
        assert_eq!(prepared.sample_grid().len(), crate::MAX_SAMPLES_PER_PIXEL as usize);
    }

    #[test]
    fn test_color_to_rgb8() {
        assert_eq!(color_to_rgb8(Color::new(0.0, 0.5, 1.0)), [0, 127, 255]);
        assert_eq!(color_to_rgb8(Color::new(-1.0, 2.0, f32::NAN)), [0, 255, 0]);
    }

    #[test]
    fn test_image_iter_coordinates() {
        let mut image = ImageBuffer::new(3, 2);
        image.set(2, 1, Color::ONE);

        let lit: Vec<(u32, u32)> = image
            .iter()
            .filter(|(_, _, c)| *c == Color::ONE)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert_eq!(lit, vec![(2, 1)]);
        assert_eq!(image.to_rgb8().len(), 18);
    }
}
