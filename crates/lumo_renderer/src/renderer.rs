//! Frame driver.
//!
//! Casts one primary ray per pixel, shades the nearest hit at depth 1 and
//! writes the clamped 8-bit color to an [`ImageSink`].

use std::time::Instant;

use crate::bucket::{render_buckets, DEFAULT_BUCKET_SIZE};
use crate::shading::shade;
use crate::{Camera, ImageSink, Scene};
use lumo_core::{Color, RenderSettings};
use lumo_math::{Interval, Ray};

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Color written where primary rays miss everything
    pub background: Color,
    /// Render buckets on the rayon pool instead of a single loop
    pub parallel: bool,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: Color::ZERO,
            parallel: true,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    pub fn from_settings(settings: &RenderSettings) -> Self {
        Self {
            background: Color::from_array(settings.background),
            parallel: settings.parallel,
            bucket_size: settings.bucket_size,
        }
    }
}

/// Compute the color seen by a primary ray.
pub fn ray_color(ray: &Ray, scene: &Scene, config: &RenderConfig) -> Color {
    match scene.nearest_hit(ray) {
        Some(hit) => shade(scene, &hit, ray, 1),
        None => config.background,
    }
}

/// Convert a color to 8-bit RGB, clamping and truncating each channel.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let r = (255.0 * Interval::UNIT.clamp(color.x)) as u8;
    let g = (255.0 * Interval::UNIT.clamp(color.y)) as u8;
    let b = (255.0 * Interval::UNIT.clamp(color.z)) as u8;
    [r, g, b]
}

/// Render a single pixel.
pub fn render_pixel(camera: &Camera, scene: &Scene, x: u32, y: u32, config: &RenderConfig) -> Color {
    ray_color(&camera.get_ray(x, y), scene, config)
}

/// Render the whole image into `sink`.
///
/// The camera must already be initialized. The parallel and sequential
/// paths produce identical pixels.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig, sink: &mut dyn ImageSink) {
    let start = Instant::now();
    log::info!(
        "Rendering {}x{} ({}, max depth {})",
        camera.image_width,
        camera.image_height,
        if config.parallel { "bucketed" } else { "sequential" },
        scene.max_depth
    );

    if config.parallel {
        render_buckets(camera, scene, config, sink);
    } else {
        render_sequential(camera, scene, config, sink);
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
}

/// Single-threaded column-by-column render.
fn render_sequential(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    sink: &mut dyn ImageSink,
) {
    let width = camera.image_width;
    let mut last_reported = 0;

    for x in 0..width {
        for y in 0..camera.image_height {
            let [r, g, b] = color_to_rgb(render_pixel(camera, scene, x, y, config));
            sink.set_pixel(x, y, r, g, b);
        }

        let percent = (x + 1) * 100 / width;
        if percent >= last_reported + 10 {
            last_reported = percent - percent % 10;
            log::info!("{}% complete", last_reported);
        }
    }
}
