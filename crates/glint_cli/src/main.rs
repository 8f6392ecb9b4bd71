use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use glint_core::load_scene;
use glint_renderer::{render, render_parallel, ImageBuffer, PreparedScene};

mod cli;

use cli::Args;

fn save_image(image: &ImageBuffer, args: &Args) -> Result<()> {
    let rgb = image::RgbImage::from_raw(image.width, image.height, image.to_rgb8())
        .context("Framebuffer size does not match its resolution")?;
    rgb.save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level.into())
        .parse_default_env()
        .init();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the render thread pool")?;
    }

    let start = Instant::now();
    let mut scene = load_scene(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;
    if let Some(samples) = args.samples {
        scene.config.samples_per_pixel = samples;
    }
    log::info!("Loaded '{}' in {:?}", scene.name, start.elapsed());

    let prepared = PreparedScene::new(scene);
    let camera = &prepared.scene().camera;
    log::info!("Rendering {}x{}", camera.width(), camera.height());

    let start = Instant::now();
    let image = if args.sequential {
        render(&prepared)
    } else {
        render_parallel(&prepared)
    };
    log::info!("Rendered in {:?}", start.elapsed());

    save_image(&image, &args)?;
    log::info!("Saved {}", args.output.display());

    Ok(())
}
