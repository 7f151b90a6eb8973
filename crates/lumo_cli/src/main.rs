//! `lumo` - render a scene file to an image.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use lumo_core::{load_scene, RenderSettings};
use lumo_renderer::{render, Camera, Framebuffer, ImageSink, RenderConfig, Scene};

#[derive(Parser, Debug)]
#[command(name = "lumo")]
#[command(about = "Whitted-style ray tracer", long_about = None)]
struct Cli {
    /// Scene description file
    scene: PathBuf,

    /// Output image; the format follows the extension
    #[arg(default_value = "output.bmp")]
    output: PathBuf,

    /// JSON render settings (camera, floor, background, buckets)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Image to map onto the floor instead of the checkerboard
    #[arg(short, long)]
    texture: Option<String>,

    /// Repeat the floor texture on every tile
    #[arg(long)]
    texture_per_tile: bool,

    /// Render on a single thread
    #[arg(long)]
    sequential: bool,

    /// Bucket edge length in pixels for parallel rendering
    #[arg(long)]
    bucket_size: Option<u32>,

    /// Vertical field of view in degrees
    #[arg(long)]
    fov: Option<f64>,
}

impl Cli {
    /// Load the settings file, if any, and apply command line overrides.
    fn settings(&self) -> Result<RenderSettings> {
        let mut settings = match &self.config {
            Some(path) => RenderSettings::from_json_file(path)
                .with_context(|| format!("Failed to read settings {}", path.display()))?,
            None => RenderSettings::default(),
        };

        if let Some(texture) = &self.texture {
            settings.floor.texture = Some(texture.clone());
        }
        if self.texture_per_tile {
            settings.floor.texture_per_tile = true;
        }
        if self.sequential {
            settings.parallel = false;
        }
        if let Some(size) = self.bucket_size {
            settings.bucket_size = size;
        }
        if let Some(fov) = self.fov {
            settings.camera.fov_y = fov;
        }

        Ok(settings)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    run(&Cli::parse())
}

/// Load, render and save. Nothing is written if loading fails.
fn run(cli: &Cli) -> Result<()> {
    let settings = cli.settings()?;

    let desc = load_scene(&cli.scene)
        .with_context(|| format!("Failed to load scene {}", cli.scene.display()))?;
    let scene = Scene::from_description(&desc, &settings.floor);

    let size = desc.image_size;
    let mut camera = Camera::from_settings(&settings.camera).with_resolution(size, size);
    camera.initialize();

    let start = Instant::now();
    let mut framebuffer = Framebuffer::new(size, size);
    render(&camera, &scene, &RenderConfig::from_settings(&settings), &mut framebuffer);

    framebuffer
        .save(&cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    log::info!("Done in {:.2?}", start.elapsed());

    Ok(())
}
