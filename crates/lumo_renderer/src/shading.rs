//! Phong illumination with hard shadows and mirror reflection.

use crate::scene::{Hit, Scene};
use crate::{Hittable, Surface};
use lumo_core::{Color, PointLight};
use lumo_math::{DVec3, Ray};

/// Shadow rays start this far off the surface, along the normal.
pub const SHADOW_BIAS: f64 = 1e-3;

/// Reflected rays start this far along the reflected direction.
pub const REFLECTION_BIAS: f64 = 1e-4;

/// Mirror `direction` about the unit `normal`.
#[inline]
pub fn reflect(direction: DVec3, normal: DVec3) -> DVec3 {
    direction - 2.0 * direction.dot(normal) * normal
}

/// Color seen along `ray` at `hit`, following mirror reflections.
///
/// Primary hits are shaded at depth 1. A reflection is only followed while
/// `depth < scene.max_depth`. Bounces are walked in a loop, so stack use
/// does not grow with `max_depth`. The result is not clamped.
pub fn shade(scene: &Scene, hit: &Hit, ray: &Ray, depth: u32) -> Color {
    let mut color = Color::ZERO;
    let mut weight: f64 = 1.0;
    let (mut hit, mut ray, mut depth) = (*hit, *ray, depth);

    while let Some(surface) = scene.surface(hit.index) {
        let material = surface.material();
        let normal = surface.normal_at(hit.point);
        color += weight * local_color(scene, surface, &hit, &ray, normal);

        if depth >= scene.max_depth || !material.is_reflective() {
            break;
        }

        let reflected = Ray::offset(hit.point, reflect(ray.direction(), normal), REFLECTION_BIAS);
        let Some(next) = scene.nearest_hit(&reflected) else {
            break;
        };

        weight *= material.coefficients.reflective;
        hit = next;
        ray = reflected;
        depth += 1;
    }

    color
}

/// Ambient, diffuse and specular terms at a single hit.
fn local_color(scene: &Scene, surface: &Surface, hit: &Hit, ray: &Ray, normal: DVec3) -> Color {
    let material = surface.material();
    let k = material.coefficients;
    let albedo = surface.albedo_at(hit.point);

    let mut color = k.ambient * albedo;

    let lights = scene.point_lights.iter().chain(
        scene
            .spot_lights
            .iter()
            .filter(|spot| spot.illuminates(hit.point))
            .map(|spot| &spot.light),
    );

    for light in lights {
        if in_shadow(scene, hit, normal, light) {
            continue;
        }

        let to_light = light.direction_from(hit.point);
        let diffuse = normal.dot(to_light).max(0.0);
        color += light.color * k.diffuse * diffuse * albedo;

        let to_viewer = -ray.direction();
        let mirrored = reflect(-to_light, normal);
        let specular = to_viewer.dot(mirrored).max(0.0).powi(material.shininess as i32);
        color += light.color * k.specular * specular;
    }

    color
}

/// Check whether any other surface blocks the way from `hit` to `light`.
fn in_shadow(scene: &Scene, hit: &Hit, normal: DVec3, light: &PointLight) -> bool {
    let origin = hit.point + normal * SHADOW_BIAS;
    let shadow_ray = Ray::new(origin, light.position - origin);
    scene.is_occluded(&shadow_ray, hit.index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Floor, Sphere, Triangle};
    use approx::assert_relative_eq;
    use lumo_core::{Coefficients, Material, SpotLight};

    fn matte(ambient: f64, diffuse: f64) -> Material {
        Material::new(Color::ONE, Coefficients::new(ambient, diffuse, 0.0, 0.0), 1)
    }

    fn hit_from_above(scene: &Scene) -> (Hit, Ray) {
        let ray = Ray::new(DVec3::new(0.0, 0.0, 50.0), -DVec3::Z);
        let hit = scene.nearest_hit(&ray).expect("ray should hit the scene");
        (hit, ray)
    }

    #[test]
    fn test_reflect() {
        let r = reflect(DVec3::new(1.0, 0.0, -1.0), DVec3::Z);
        assert_eq!(r, DVec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_ambient_only_without_lights() {
        let mut scene = Scene::new(1);
        scene.add(Sphere::new(DVec3::ZERO, 10.0, matte(0.25, 0.8)));

        let (hit, ray) = hit_from_above(&scene);
        assert_eq!(shade(&scene, &hit, &ray, 1), Color::splat(0.25));
    }

    #[test]
    fn test_diffuse_head_on() {
        let mut scene = Scene::new(1);
        scene.add(Sphere::new(DVec3::ZERO, 10.0, matte(0.2, 0.8)));
        scene.add_point_light(PointLight::new(DVec3::new(0.0, 0.0, 100.0), Color::ONE));

        let (hit, ray) = hit_from_above(&scene);
        let color = shade(&scene, &hit, &ray, 1);
        assert_relative_eq!(color.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(color.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(color.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_light_color_scales_every_channel() {
        let material = Material::new(
            Color::new(1.0, 0.5, 0.25),
            Coefficients::new(0.0, 1.0, 1.0, 0.0),
            1,
        );
        let mut scene = Scene::new(1);
        scene.add(Sphere::new(DVec3::ZERO, 10.0, material));
        scene.add_point_light(PointLight::new(
            DVec3::new(0.0, 0.0, 100.0),
            Color::new(0.5, 1.0, 2.0),
        ));

        let (hit, ray) = hit_from_above(&scene);
        let color = shade(&scene, &hit, &ray, 1);

        // diffuse = light * albedo, specular = light (v.r = 1)
        assert_relative_eq!(color.x, 0.5 * 1.0 + 0.5, epsilon = 1e-12);
        assert_relative_eq!(color.y, 1.0 * 0.5 + 1.0, epsilon = 1e-12);
        assert_relative_eq!(color.z, 2.0 * 0.25 + 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_occluded_light_contributes_nothing() {
        let mut scene = Scene::new(1);
        scene.add(Floor::new(1000.0, 20.0, matte(0.1, 0.9)));
        // Blocker between the floor and the light
        scene.add(Triangle::new(
            DVec3::new(-10.0, -10.0, 20.0),
            DVec3::new(10.0, -10.0, 20.0),
            DVec3::new(0.0, 10.0, 20.0),
            matte(0.0, 0.0),
        ));
        scene.add_point_light(PointLight::new(DVec3::new(1.0, 1.0, 100.0), Color::ONE));

        // Hit the floor on a white tile directly under the blocker
        let ray = Ray::new(DVec3::new(1.0, 1.0, 10.0), -DVec3::Z);
        let hit = scene.nearest_hit(&ray).unwrap();
        assert_eq!(hit.index, 0);

        let color = shade(&scene, &hit, &ray, 1);
        assert_eq!(color, Color::splat(0.1));
    }

    #[test]
    fn test_spot_light_cone() {
        let mut scene = Scene::new(1);
        scene.add(Sphere::new(DVec3::ZERO, 10.0, matte(0.0, 1.0)));

        let light = PointLight::new(DVec3::new(0.0, 0.0, 100.0), Color::ONE);
        scene.add_spot_light(SpotLight::new(light, DVec3::new(0.0, 0.0, -1.0), 5.0));
        let (hit, ray) = hit_from_above(&scene);
        assert_relative_eq!(shade(&scene, &hit, &ray, 1).x, 1.0, epsilon = 1e-12);

        // Same light aimed away
        scene.spot_lights[0] = SpotLight::new(light, DVec3::X, 5.0);
        assert_eq!(shade(&scene, &hit, &ray, 1), Color::ZERO);
    }

    #[test]
    fn test_reflection_adds_mirrored_surface() {
        let mirror = Material::new(Color::ZERO, Coefficients::new(0.0, 0.0, 0.0, 0.5), 1);
        let red = Material::new(Color::X, Coefficients::new(1.0, 0.0, 0.0, 0.0), 1);

        let mut scene = Scene::new(2);
        scene.add(Floor::new(1000.0, 20.0, mirror));
        scene.add(Sphere::new(DVec3::new(0.0, 0.0, 100.0), 10.0, red));

        // Looking straight down at the floor; its reflection sees the sphere
        let ray = Ray::new(DVec3::new(0.0, 0.0, 50.0), -DVec3::Z);
        let hit = scene.nearest_hit(&ray).unwrap();
        assert_eq!(hit.index, 0);

        let color = shade(&scene, &hit, &ray, 1);
        assert_relative_eq!(color.x, 0.5, epsilon = 1e-12);
        assert_eq!(color.y, 0.0);

        // At the depth limit the reflective step is skipped
        assert_eq!(shade(&scene, &hit, &ray, 2), Color::ZERO);
    }

    #[test]
    fn test_reflection_chain_is_weighted() {
        // Two facing mirrors; each bounce adds its ambient scaled by the
        // product of the reflectivities before it
        let mirror = Material::new(Color::ONE, Coefficients::new(0.5, 0.0, 0.0, 0.5), 1);
        let mut scene = Scene::new(3);
        scene.add(Floor::new(1000.0, 20.0, mirror));
        scene.add(Triangle::new(
            DVec3::new(-100.0, -100.0, 10.0),
            DVec3::new(0.0, 100.0, 10.0),
            DVec3::new(100.0, -100.0, 10.0),
            mirror,
        ));

        let ray = Ray::new(DVec3::new(1.0, 1.0, 5.0), -DVec3::Z);
        let hit = scene.nearest_hit(&ray).unwrap();
        assert_eq!(hit.index, 0);

        // Floor tile at (1, 1) is white: 0.5 + 0.5 * 0.5 + 0.25 * 0.5
        let color = shade(&scene, &hit, &ray, 1);
        assert_relative_eq!(color.x, 0.875, epsilon = 1e-12);
    }

    #[test]
    fn test_deep_mirror_recursion_does_not_overflow() {
        let mirror = Material::new(Color::ONE, Coefficients::new(0.0, 0.0, 0.0, 1.0), 1);
        let mut scene = Scene::new(200_000);
        scene.add(Floor::new(1000.0, 20.0, mirror));
        scene.add(Triangle::new(
            DVec3::new(-100.0, -100.0, 10.0),
            DVec3::new(0.0, 100.0, 10.0),
            DVec3::new(100.0, -100.0, 10.0),
            mirror,
        ));

        let ray = Ray::new(DVec3::new(1.0, 1.0, 5.0), -DVec3::Z);
        let hit = scene.nearest_hit(&ray).unwrap();
        assert_eq!(shade(&scene, &hit, &ray, 1), Color::ZERO);
    }

    #[test]
    fn test_reflection_miss_adds_nothing() {
        let mirror = Material::new(Color::ONE, Coefficients::new(0.3, 0.0, 0.0, 1.0), 1);
        let mut scene = Scene::new(5);
        scene.add(Sphere::new(DVec3::ZERO, 10.0, mirror));

        let (hit, ray) = hit_from_above(&scene);
        assert_eq!(shade(&scene, &hit, &ray, 1), Color::splat(0.3));
    }
}
