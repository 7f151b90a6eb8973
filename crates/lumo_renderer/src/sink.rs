//! Output targets for rendered pixels.

use std::path::Path;

use image::{Rgb, RgbImage};
use thiserror::Error;

/// Errors that can occur while writing the rendered image.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Failed to save image {path}: {source}")]
    Save {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

/// Something that accepts 8-bit RGB pixels and can be written out.
pub trait ImageSink {
    /// Store a pixel. Coordinates outside the image are ignored.
    fn set_pixel(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8);

    /// Write the image; the format follows the path extension.
    fn save(&self, path: &Path) -> Result<(), SinkError>;
}

/// In-memory RGB image.
#[derive(Clone, Debug)]
pub struct Framebuffer {
    image: RgbImage,
}

impl Framebuffer {
    /// Create a black framebuffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Get the pixel at (x, y), or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        (x < self.width() && y < self.height()).then(|| self.image.get_pixel(x, y).0)
    }

    /// Raw RGB bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }
}

impl ImageSink for Framebuffer {
    fn set_pixel(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) {
        if x < self.width() && y < self.height() {
            self.image.put_pixel(x, y, Rgb([r, g, b]));
        }
    }

    fn save(&self, path: &Path) -> Result<(), SinkError> {
        self.image.save(path).map_err(|source| SinkError::Save {
            path: path.display().to_string(),
            source,
        })?;

        log::info!(
            "Saved {}x{} image to {}",
            self.width(),
            self.height(),
            path.display()
        );
        Ok(())
    }
}
