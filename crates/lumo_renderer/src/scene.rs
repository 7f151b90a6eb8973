//! Render-time scene: surfaces, lights and the nearest-hit query.

use std::sync::Arc;

use crate::{Floor, Hittable, Surface, TextureMapping};
use lumo_core::{FloorSettings, PointLight, SceneDescription, SpotLight, Texture};
use lumo_math::{DVec3, Ray};

/// Closest intersection along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Index of the surface in scan order
    pub index: usize,
    pub t: f64,
    pub point: DVec3,
}

/// Everything the renderer traces against. Read-only once built.
#[derive(Clone, Debug)]
pub struct Scene {
    surfaces: Vec<Surface>,
    pub point_lights: Vec<PointLight>,
    pub spot_lights: Vec<SpotLight>,
    /// Primary hits are shaded at depth 1
    pub max_depth: u32,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(max_depth: u32) -> Self {
        Self {
            surfaces: Vec::new(),
            point_lights: Vec::new(),
            spot_lights: Vec::new(),
            max_depth,
        }
    }

    /// Build a scene from a loaded description, appending the floor last.
    pub fn from_description(desc: &SceneDescription, floor: &FloorSettings) -> Self {
        let mut scene = Self::new(desc.max_depth);
        scene.surfaces = desc.objects.iter().map(Surface::from).collect();
        scene.point_lights = desc.point_lights.clone();
        scene.spot_lights = desc.spot_lights.clone();

        if floor.enabled {
            scene.add(build_floor(floor));
        }

        log::debug!(
            "Scene ready: {} surfaces, {} lights, max depth {}",
            scene.len(),
            scene.point_lights.len() + scene.spot_lights.len(),
            scene.max_depth
        );
        scene
    }

    /// Append a surface; scan order breaks exact-distance ties.
    pub fn add(&mut self, surface: impl Into<Surface>) {
        self.surfaces.push(surface.into());
    }

    pub fn add_point_light(&mut self, light: PointLight) {
        self.point_lights.push(light);
    }

    pub fn add_spot_light(&mut self, light: SpotLight) {
        self.spot_lights.push(light);
    }

    pub fn surface(&self, index: usize) -> Option<&Surface> {
        self.surfaces.get(index)
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Linear scan for the smallest valid hit distance.
    ///
    /// On an exact tie the surface that comes first wins.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<Hit> {
        let mut nearest: Option<(usize, f64)> = None;

        for (index, surface) in self.surfaces.iter().enumerate() {
            if let Some(t) = surface.intersect(ray) {
                if nearest.map_or(true, |(_, best)| t < best) {
                    nearest = Some((index, t));
                }
            }
        }

        nearest.map(|(index, t)| Hit {
            index,
            t,
            point: ray.at(t),
        })
    }

    /// Check whether any surface other than `exclude` lies along the ray.
    ///
    /// There is no distance bound: a surface beyond the light still blocks it.
    pub fn is_occluded(&self, ray: &Ray, exclude: usize) -> bool {
        self.surfaces
            .iter()
            .enumerate()
            .any(|(index, surface)| index != exclude && surface.intersect(ray).is_some())
    }
}

/// Create the floor, falling back to the checkerboard if its texture fails.
fn build_floor(settings: &FloorSettings) -> Floor {
    let floor = Floor::new(settings.floor_width, settings.tile_width, settings.material());

    let Some(path) = &settings.texture else {
        return floor;
    };

    match Texture::load(path) {
        Ok(texture) => {
            let mapping = if settings.texture_per_tile {
                TextureMapping::PerTile
            } else {
                TextureMapping::WholeFloor
            };
            log::info!(
                "Floor texture {}: {}x{} ({:?} mapping)",
                path,
                texture.width,
                texture.height,
                mapping
            );
            floor.with_texture(Arc::new(texture), mapping)
        }
        Err(e) => {
            log::warn!("Failed to load floor texture {}: {}; using checkerboard", path, e);
            floor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Sphere, Triangle};
    use lumo_core::{parse_scene, Color, Material};

    const SCENE: &str = "\
2 64
2
sphere 0 0 0 10  1 0 0  0.2 0.8 0 0  1
sphere 0 0 -30 5  0 1 0  0.2 0.8 0 0  1
1
0 0 100  1 1 1
0
";

    fn no_floor() -> FloorSettings {
        FloorSettings {
            enabled: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_from_description_appends_floor_last() {
        let desc = parse_scene(SCENE).unwrap();
        let scene = Scene::from_description(&desc, &FloorSettings::default());

        assert_eq!(scene.len(), 3);
        assert_eq!(scene.surface(0).map(Surface::kind), Some("sphere"));
        assert_eq!(scene.surface(2).map(Surface::kind), Some("floor"));
        assert_eq!(scene.max_depth, 2);
        assert_eq!(scene.point_lights.len(), 1);
    }

    #[test]
    fn test_missing_texture_falls_back_to_checkerboard() {
        let desc = parse_scene(SCENE).unwrap();
        let floor = FloorSettings {
            texture: Some("/nonexistent/lumo/floor.png".to_string()),
            ..Default::default()
        };
        let scene = Scene::from_description(&desc, &floor);

        match scene.surface(2) {
            Some(Surface::Floor(floor)) => assert!(!floor.has_texture()),
            other => panic!("expected floor, got {other:?}"),
        }
    }

    #[test]
    fn test_nearest_hit_picks_closest() {
        let desc = parse_scene(SCENE).unwrap();
        let scene = Scene::from_description(&desc, &no_floor());

        let ray = Ray::new(DVec3::new(0.0, 0.0, 50.0), -DVec3::Z);
        let hit = scene.nearest_hit(&ray).unwrap();
        assert_eq!(hit.index, 0);
        assert_eq!(hit.t, 40.0);
        assert_eq!(hit.point, DVec3::new(0.0, 0.0, 10.0));

        // From below the small sphere comes first
        let ray = Ray::new(DVec3::new(0.0, 0.0, -100.0), DVec3::Z);
        assert_eq!(scene.nearest_hit(&ray).unwrap().index, 1);

        let ray = Ray::new(DVec3::new(0.0, 0.0, 50.0), DVec3::Z);
        assert!(scene.nearest_hit(&ray).is_none());
    }

    #[test]
    fn test_nearest_hit_tie_goes_to_first_surface() {
        let red = Material::new(Color::X, Default::default(), 1);
        let green = Material::new(Color::Y, Default::default(), 1);

        let mut scene = Scene::new(1);
        scene.add(Triangle::new(
            DVec3::new(-1.0, -1.0, 0.0),
            DVec3::new(1.0, -1.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            red,
        ));
        scene.add(Triangle::new(
            DVec3::new(-1.0, -1.0, 0.0),
            DVec3::new(1.0, -1.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            green,
        ));

        let ray = Ray::new(DVec3::new(0.0, 0.0, 5.0), -DVec3::Z);
        assert_eq!(scene.nearest_hit(&ray).unwrap().index, 0);
    }

    #[test]
    fn test_is_occluded_excludes_self() {
        let mut scene = Scene::new(1);
        scene.add(Sphere::new(DVec3::ZERO, 1.0, Material::default()));
        scene.add(Sphere::new(DVec3::new(0.0, 0.0, 5.0), 1.0, Material::default()));

        let ray = Ray::new(DVec3::new(0.0, 0.0, 1.001), DVec3::Z);
        assert!(scene.is_occluded(&ray, 0));
        assert!(!scene.is_occluded(&ray, 1));

        // Pointing away from the blocker
        let ray = Ray::new(DVec3::new(0.0, 0.0, -1.001), -DVec3::Z);
        assert!(!scene.is_occluded(&ray, 0));
    }
}
