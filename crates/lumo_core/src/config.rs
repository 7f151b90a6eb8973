//! Render settings that are not part of the scene file.
//!
//! Settings come from an optional JSON file; every field has a default, so a
//! partial file only overrides what it names.
//!
//! ```json
//! {
//!   "camera": { "eye": [0, -150, 60], "fov_y": 60 },
//!   "floor": { "texture": "tiles.png", "texture_per_tile": true },
//!   "parallel": false
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scene::{Coefficients, Color, Material};

/// Errors that can occur while reading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Camera placement and view window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub eye: [f64; 3],
    pub look: [f64; 3],
    pub up: [f64; 3],

    /// Vertical field of view in degrees
    pub fov_y: f64,

    /// View window size in world units
    pub window_width: f64,
    pub window_height: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            eye: [100.0, 100.0, 100.0],
            look: [-1.0, -1.0, -1.0],
            up: [0.0, 0.0, 1.0],
            fov_y: 80.0,
            window_width: 500.0,
            window_height: 500.0,
        }
    }
}

/// The ground plane added to every scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorSettings {
    pub enabled: bool,
    pub floor_width: f64,
    pub tile_width: f64,

    /// Ambient, diffuse, specular, reflective
    pub coefficients: [f64; 4],
    pub shininess: u32,

    /// Image to map onto the floor instead of the checkerboard
    pub texture: Option<String>,

    /// Repeat the texture on every tile instead of stretching it once
    pub texture_per_tile: bool,
}

impl Default for FloorSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            floor_width: 1000.0,
            tile_width: 20.0,
            coefficients: [0.4, 0.2, 0.2, 0.2],
            shininess: 1,
            texture: None,
            texture_per_tile: false,
        }
    }
}

impl FloorSettings {
    /// Material for the floor; the color is replaced by the tile pattern.
    pub fn material(&self) -> Material {
        let [ambient, diffuse, specular, reflective] = self.coefficients;
        Material::new(
            Color::ONE,
            Coefficients::new(ambient, diffuse, specular, reflective),
            self.shininess,
        )
    }
}

/// All settings for a render invocation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub camera: CameraSettings,
    pub floor: FloorSettings,

    /// Color written where primary rays miss everything
    pub background: [f64; 3],

    /// Render buckets on the rayon thread pool
    pub parallel: bool,

    /// Bucket edge length in pixels
    pub bucket_size: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            camera: CameraSettings::default(),
            floor: FloorSettings::default(),
            background: [0.0, 0.0, 0.0],
            parallel: true,
            bucket_size: 64,
        }
    }
}

impl RenderSettings {
    /// Parse and validate settings from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the renderer cannot work with.
    pub fn validate(&self) -> Result<(), SettingsError> {
        positive("floor.floor_width", self.floor.floor_width)?;
        positive("floor.tile_width", self.floor.tile_width)?;
        Ok(())
    }

    /// Read settings from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), SettingsError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::Invalid {
            field,
            reason: format!("must be positive, got {value}"),
        })
    }
}
