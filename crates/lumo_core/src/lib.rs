//! Lumo Core - Scene description, scene files and textures.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `Shape`, `Material`, lights
//! - **Scene files**: whitespace-delimited scene file parsing and loading
//! - **Textures**: image loading and sampling for the floor
//! - **Settings**: JSON render settings (camera, floor, bucket rendering)
//!
//! # Example
//!
//! ```ignore
//! use lumo_core::load_scene;
//!
//! let desc = load_scene("scene.txt")?;
//! println!("Loaded {} objects, {} point lights",
//!     desc.objects.len(),
//!     desc.point_lights.len());
//! ```

pub mod config;
pub mod scene;
pub mod scene_file;
pub mod texture;

// Re-export commonly used types
pub use config::{CameraSettings, FloorSettings, RenderSettings, SettingsError};
pub use scene::{
    Coefficients, Color, Material, PointLight, SceneDescription, SceneObject, Shape, SpotLight,
};
pub use scene_file::{load_scene, parse_scene, LoadError, ParseError};
pub use texture::{Texture, TextureError, TextureResult};
