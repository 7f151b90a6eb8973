//! Texture loading and sampling for the floor.
//!
//! Textures keep the decoded 8-bit pixel buffer with its original channel
//! count; sampling converts to 0-1 RGB on the fly.

use std::path::Path;

use lumo_math::DVec3;
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture: {0}")]
    LoadError(String),

    #[error("Unsupported texture format: {0}")]
    UnsupportedFormat(String),

    #[error("Texture buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A loaded texture with raw pixel data.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// Bytes per pixel (1 = gray, 2 = gray + alpha, 3 = RGB, 4 = RGBA)
    pub channels: u8,

    /// Row-major pixel bytes, `channels` per pixel, top row first
    pub pixels: Vec<u8>,

    /// Original file path (for debugging)
    pub path: String,
}

impl Texture {
    /// Create a texture from a raw pixel buffer.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: u8,
        pixels: Vec<u8>,
        path: impl Into<String>,
    ) -> TextureResult<Self> {
        if !(1..=4).contains(&channels) {
            return Err(TextureError::UnsupportedFormat(format!(
                "{channels} channels"
            )));
        }

        let expected = width as usize * height as usize * channels as usize;
        if pixels.len() != expected || expected == 0 {
            return Err(TextureError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            pixels,
            path: path.into(),
        })
    }

    /// Load a texture from an image file.
    pub fn load<P: AsRef<Path>>(path: P) -> TextureResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|e| {
            TextureError::LoadError(format!("Failed to open {}: {}", path.display(), e))
        })?;

        // Keep the source channel count, narrowed to 8 bits
        let channels = img.color().channel_count();
        let (width, height, pixels) = match channels {
            1 => {
                let buf = img.to_luma8();
                (buf.width(), buf.height(), buf.into_raw())
            }
            2 => {
                let buf = img.to_luma_alpha8();
                (buf.width(), buf.height(), buf.into_raw())
            }
            3 => {
                let buf = img.to_rgb8();
                (buf.width(), buf.height(), buf.into_raw())
            }
            _ => {
                let buf = img.to_rgba8();
                (buf.width(), buf.height(), buf.into_raw())
            }
        };

        let texture = Self::from_raw(
            width,
            height,
            channels.min(4),
            pixels,
            path.to_string_lossy(),
        )?;

        log::debug!(
            "Loaded texture: {} ({}x{}, {} channels, {:.1} KB)",
            texture.path,
            texture.width,
            texture.height,
            texture.channels,
            texture.size_bytes() as f64 / 1024.0
        );

        Ok(texture)
    }

    /// Sample the texture at UV coordinates (nearest pixel).
    ///
    /// UV coordinates are clamped to [0, 1], with (0, 0) at bottom-left.
    pub fn sample(&self, u: f64, v: f64) -> DVec3 {
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);

        // Flip V for image coordinates
        let x = (u * (self.width - 1) as f64) as u32;
        let y = ((1.0 - v) * (self.height - 1) as f64) as u32;

        self.get_pixel(x.min(self.width - 1), y.min(self.height - 1))
    }

    /// Get pixel at integer coordinates as 0-1 RGB.
    ///
    /// Gray images are expanded to all three channels.
    fn get_pixel(&self, x: u32, y: u32) -> DVec3 {
        let channels = self.channels as usize;
        let idx = (y as usize * self.width as usize + x as usize) * channels;
        let Some(texel) = self.pixels.get(idx..idx + channels) else {
            return DVec3::ZERO;
        };

        let r = texel[0] as f64 / 255.0;
        if channels >= 3 {
            DVec3::new(r, texel[1] as f64 / 255.0, texel[2] as f64 / 255.0)
        } else {
            DVec3::splat(r)
        }
    }

    /// Get total size in bytes.
    pub fn size_bytes(&self) -> usize {
        self.pixels.len()
    }
}
