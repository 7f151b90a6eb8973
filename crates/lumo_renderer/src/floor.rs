//! Tiled floor in the z = 0 plane.
//!
//! The floor is a square of side `floor_width` centered on the origin,
//! divided into `tile_width` tiles. Its color is a black/white checkerboard
//! unless a texture is attached.

use std::sync::Arc;

use crate::hittable::{Hittable, HIT_RANGE};
use lumo_core::{Color, Material, Texture};
use lumo_math::{DVec3, Interval, Ray};

/// Rays with |dir.z| below this never reach the plane.
const PARALLEL_EPSILON: f64 = 1e-6;

/// How a texture is laid over the floor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextureMapping {
    /// One copy stretched across the whole floor
    #[default]
    WholeFloor,
    /// One copy per tile
    PerTile,
}

/// A finite checkerboard or textured floor.
#[derive(Clone, Debug)]
pub struct Floor {
    floor_width: f64,
    tile_width: f64,
    /// [-w/2, w/2], shared by x and y
    extent: Interval,
    texture: Option<Arc<Texture>>,
    mapping: TextureMapping,
    material: Material,
}

impl Floor {
    /// Create a checkerboard floor.
    pub fn new(floor_width: f64, tile_width: f64, material: Material) -> Self {
        let half = floor_width.abs() / 2.0;
        Self {
            floor_width: floor_width.abs(),
            tile_width,
            extent: Interval::new(-half, half),
            texture: None,
            mapping: TextureMapping::default(),
            material,
        }
    }

    /// Attach a texture, replacing the checkerboard.
    pub fn with_texture(mut self, texture: Arc<Texture>, mapping: TextureMapping) -> Self {
        self.texture = Some(texture);
        self.mapping = mapping;
        self
    }

    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }

    /// Position relative to the floor's (-w/2, -w/2) corner.
    fn local(&self, point: DVec3) -> (f64, f64) {
        let half = self.floor_width / 2.0;
        (point.x + half, point.y + half)
    }

    /// Black/white checkerboard; the corner tile is white.
    fn checker_at(&self, point: DVec3) -> Color {
        let (x, y) = self.local(point);
        let tile_x = (x / self.tile_width).floor() as i64;
        let tile_y = (y / self.tile_width).floor() as i64;

        // Compare parities; indices saturate for a zero tile width
        if tile_x.rem_euclid(2) == tile_y.rem_euclid(2) {
            Color::ONE
        } else {
            Color::ZERO
        }
    }

    /// Texture coordinates with wraparound.
    fn uv_at(&self, point: DVec3) -> (f64, f64) {
        let (x, y) = self.local(point);
        match self.mapping {
            TextureMapping::PerTile => (
                x.rem_euclid(self.tile_width) / self.tile_width,
                y.rem_euclid(self.tile_width) / self.tile_width,
            ),
            TextureMapping::WholeFloor => (
                (x / self.floor_width).rem_euclid(1.0),
                (y / self.floor_width).rem_euclid(1.0),
            ),
        }
    }
}

impl Hittable for Floor {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let dir = ray.direction();
        if dir.z.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = -ray.origin().z / dir.z;
        if !HIT_RANGE.surrounds(t) {
            return None;
        }

        let p = ray.at(t);
        (self.extent.contains(p.x) && self.extent.contains(p.y)).then_some(t)
    }

    fn normal_at(&self, _point: DVec3) -> DVec3 {
        DVec3::Z
    }

    fn material(&self) -> &Material {
        &self.material
    }

    fn albedo_at(&self, point: DVec3) -> Color {
        match &self.texture {
            Some(texture) => {
                let (u, v) = self.uv_at(point);
                texture.sample(u, v)
            }
            None => self.checker_at(point),
        }
    }
}
