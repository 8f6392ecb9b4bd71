//! Simple ray tracer example.
//!
//! Builds a small scene in code and saves it in PPM format.
//!
//! Run with: cargo run --example simple_render

use std::fs::File;
use std::io::{BufWriter, Write};

use glint_core::{Camera, Light, Material, SceneNode};
use glint_renderer::{
    color_to_rgb8, render_parallel, Color, ImageBuffer, PreparedScene, Scene, Vec3,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let start = std::time::Instant::now();
    let scene = build_scene()?;
    println!("Scene built in {:?}", start.elapsed());

    let prepared = PreparedScene::new(scene);
    let camera = &prepared.scene().camera;
    println!(
        "Rendering {}x{} @ {} spp...",
        camera.width(),
        camera.height(),
        prepared.sample_grid().len()
    );

    let start = std::time::Instant::now();
    let image = render_parallel(&prepared);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    save_ppm(&image, filename)?;
    println!("Saved to {}", filename);
    Ok(())
}

fn build_scene() -> Result<Scene, Box<dyn std::error::Error>> {
    let mut scene = Scene::new("simple");
    let root = scene.graph.root();

    // A ring of spheres under one rotating group
    let ring = scene.graph.add_node(
        root,
        SceneNode::group("ring").with_srt(Vec3::ONE, Vec3::new(0.3, 0.0, 0.0), Vec3::ZERO),
    )?;
    for i in 0..6 {
        let angle = i as f32 * std::f32::consts::TAU / 6.0;
        let material = if i % 2 == 0 { "gold" } else { "slate" };
        scene.graph.add_node(
            ring,
            SceneNode::sphere(format!("ball_{i}"))
                .with_translation(Vec3::new(angle.cos() * 3.0, 0.0, angle.sin() * 3.0))
                .with_uniform_scale(0.8)
                .with_material(material),
        )?;
    }
    scene
        .graph
        .add_node(
            root,
            SceneNode::sphere("centre")
                .with_uniform_scale(1.5)
                .with_material("slate"),
        )?;

    let gold = Material::blinn("gold", Color::new(0.8, 0.6, 0.2), Color::splat(0.9), 40.0);
    let slate = Material::blinn("slate", Color::new(0.3, 0.35, 0.4), Color::splat(0.2), 8.0);
    scene.add_material(gold)?;
    scene.add_material(slate)?;
    scene.resolve_materials()?;

    scene.add_light(Light::ambient("fill", Color::splat(0.08)));
    scene.add_light(Light::directional("key", Color::splat(0.9), Vec3::new(-1.0, -2.0, -1.0)));
    scene.add_light(Light::point("rim", Color::new(0.3, 0.3, 0.5), Vec3::new(0.0, 4.0, -6.0)));

    scene.camera = Camera::new(Vec3::new(0.0, 3.0, 9.0), Vec3::ZERO, Vec3::Y, 45.0, 800, 450)?;
    scene.config = scene
        .config
        .clone()
        .with_samples(9)
        .with_background(Color::new(0.05, 0.05, 0.08));

    Ok(scene)
}

fn save_ppm(image: &ImageBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for (_, _, color) in image.iter() {
        let [r, g, b] = color_to_rgb8(color);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    Ok(())
}
