//! Lumo Renderer - CPU Whitted-style ray tracing
//!
//! A recursive ray tracer with Phong shading, hard shadows from point and
//! spot lights, and mirror reflection. One ray per pixel, no sampling.
//!
//! # Example
//!
//! ```ignore
//! use lumo_core::{load_scene, RenderSettings};
//! use lumo_renderer::{render, Camera, Framebuffer, RenderConfig, Scene};
//!
//! let settings = RenderSettings::default();
//! let desc = load_scene("scene.txt")?;
//! let scene = Scene::from_description(&desc, &settings.floor);
//!
//! let mut camera = Camera::from_settings(&settings.camera)
//!     .with_resolution(desc.image_size, desc.image_size);
//! camera.initialize();
//!
//! let mut fb = Framebuffer::new(desc.image_size, desc.image_size);
//! render(&camera, &scene, &RenderConfig::from_settings(&settings), &mut fb);
//! ```

mod bucket;
mod camera;
mod floor;
mod hittable;
mod quadric;
mod renderer;
mod scene;
mod shading;
mod sink;
mod sphere;
mod surface;
mod triangle;

pub use bucket::{
    generate_buckets, render_bucket, render_buckets, Bucket, BucketResult, DEFAULT_BUCKET_SIZE,
};
pub use camera::Camera;
pub use floor::{Floor, TextureMapping};
pub use hittable::{solve_quadratic, Hittable, HIT_EPSILON, HIT_RANGE};
pub use quadric::Quadric;
pub use renderer::{color_to_rgb, ray_color, render, render_pixel, RenderConfig};
pub use scene::{Hit, Scene};
pub use shading::{reflect, shade, REFLECTION_BIAS, SHADOW_BIAS};
pub use sink::{Framebuffer, ImageSink, SinkError};
pub use sphere::Sphere;
pub use surface::Surface;
pub use triangle::Triangle;

/// Re-export common math and scene types
pub use lumo_core::{Color, Material};
pub use lumo_math::{DVec3, Ray};
