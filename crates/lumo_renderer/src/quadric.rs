//! General quadric surface, optionally clipped to a box.
//!
//! The surface is the zero set of
//! `F(x,y,z) = Ax² + By² + Cz² + Dxy + Exz + Fyz + Gx + Hy + Iz + J`.
//! Clipping a cylinder or cone to a box gives a finite patch.

use crate::hittable::{solve_quadratic, Hittable, HIT_RANGE};
use lumo_core::Material;
use lumo_math::{Aabb, DVec3, Ray};

/// A quadric surface clipped to an axis-aligned box.
#[derive(Clone, Debug)]
pub struct Quadric {
    /// A..J
    coefficients: [f64; 10],
    /// Axes without a positive extent are unbounded
    bounds: Aabb,
    material: Material,
}

impl Quadric {
    /// Create a quadric from its ten coefficients and a clip box given as a
    /// reference corner plus length/width/height (zero or negative = unbounded).
    pub fn new(coefficients: [f64; 10], corner: DVec3, extent: DVec3, material: Material) -> Self {
        Self {
            coefficients,
            bounds: Aabb::from_corner(corner, extent),
            material,
        }
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Evaluate F at a point (zero on the surface).
    pub fn evaluate(&self, p: DVec3) -> f64 {
        let [a, b, c, d, e, f, g, h, i, j] = self.coefficients;
        a * p.x * p.x
            + b * p.y * p.y
            + c * p.z * p.z
            + d * p.x * p.y
            + e * p.x * p.z
            + f * p.y * p.z
            + g * p.x
            + h * p.y
            + i * p.z
            + j
    }
}

impl Hittable for Quadric {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let [a, b, c, d, e, f, g, h, i, j] = self.coefficients;
        let o = ray.origin();
        let r = ray.direction();

        // Substitute P = o + t r into F and collect powers of t
        let aq = a * r.x * r.x
            + b * r.y * r.y
            + c * r.z * r.z
            + d * r.x * r.y
            + e * r.x * r.z
            + f * r.y * r.z;

        let bq = 2.0 * a * o.x * r.x
            + 2.0 * b * o.y * r.y
            + 2.0 * c * o.z * r.z
            + d * (o.x * r.y + o.y * r.x)
            + e * (o.x * r.z + o.z * r.x)
            + f * (o.y * r.z + o.z * r.y)
            + g * r.x
            + h * r.y
            + i * r.z;

        let cq = a * o.x * o.x
            + b * o.y * o.y
            + c * o.z * o.z
            + d * o.x * o.y
            + e * o.x * o.z
            + f * o.y * o.z
            + g * o.x
            + h * o.y
            + i * o.z
            + j;

        let (t1, t2) = solve_quadratic(aq, bq, cq)?;
        [t1, t2]
            .into_iter()
            .find(|&t| HIT_RANGE.surrounds(t) && self.bounds.contains(ray.at(t)))
    }

    /// Gradient of F, normalized.
    fn normal_at(&self, p: DVec3) -> DVec3 {
        let [a, b, c, d, e, f, g, h, i, _] = self.coefficients;
        DVec3::new(
            2.0 * a * p.x + d * p.y + e * p.z + g,
            2.0 * b * p.y + d * p.x + f * p.z + h,
            2.0 * c * p.z + e * p.x + f * p.y + i,
        )
        .normalize_or_zero()
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// x² + y² - 25 = 0: a cylinder of radius 5 around the z axis.
    const CYLINDER: [f64; 10] = [1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -25.0];

    /// x² + y² + z² - 4 = 0: a sphere of radius 2.
    const SPHERE: [f64; 10] = [1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -4.0];

    #[test]
    fn test_quadric_sphere_matches_sphere() {
        let quadric = Quadric::new(SPHERE, DVec3::ZERO, DVec3::ZERO, Material::default());
        let ray = Ray::new(DVec3::new(0.0, 0.0, 10.0), DVec3::new(0.0, 0.0, -1.0));

        let t = quadric.intersect(&ray).unwrap();
        assert_relative_eq!(t, 8.0);
        assert_relative_eq!(quadric.evaluate(ray.at(t)), 0.0, epsilon = 1e-9);
        assert_eq!(quadric.normal_at(ray.at(t)), DVec3::Z);
    }

    #[test]
    fn test_unbounded_cylinder_hits_anywhere_along_axis() {
        let quadric = Quadric::new(CYLINDER, DVec3::ZERO, DVec3::ZERO, Material::default());
        assert!(quadric.bounds().is_unbounded());

        for z in [-1e6, -250.0, 0.0, 17.5, 1e6] {
            let ray = Ray::new(DVec3::new(-20.0, 0.0, z), DVec3::X);
            let t = quadric.intersect(&ray).expect("infinite cylinder should be hit");
            assert_relative_eq!(t, 15.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_clipped_cylinder() {
        // Only 0 <= z <= 10 is kept
        let quadric = Quadric::new(
            CYLINDER,
            DVec3::ZERO,
            DVec3::new(0.0, 0.0, 10.0),
            Material::default(),
        );

        let inside = Ray::new(DVec3::new(-20.0, 0.0, 5.0), DVec3::X);
        assert_relative_eq!(quadric.intersect(&inside).unwrap(), 15.0, epsilon = 1e-9);

        let above = Ray::new(DVec3::new(-20.0, 0.0, 11.0), DVec3::X);
        assert!(quadric.intersect(&above).is_none());
    }

    #[test]
    fn test_clip_falls_through_to_far_root() {
        // Keep only x >= 0 of the cylinder: the near wall is clipped away
        let quadric = Quadric::new(
            CYLINDER,
            DVec3::new(0.0, -10.0, 0.0),
            DVec3::new(10.0, 0.0, 0.0),
            Material::default(),
        );

        let ray = Ray::new(DVec3::new(-20.0, 0.0, 0.0), DVec3::X);
        assert_relative_eq!(quadric.intersect(&ray).unwrap(), 25.0, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_extent_does_not_clip() {
        // Only a positive height clips z
        let quadric = Quadric::new(
            CYLINDER,
            DVec3::ZERO,
            DVec3::new(0.0, 0.0, -10.0),
            Material::default(),
        );

        let ray = Ray::new(DVec3::new(-20.0, 0.0, 50.0), DVec3::X);
        assert_relative_eq!(quadric.intersect(&ray).unwrap(), 15.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ray_along_cylinder_axis_misses() {
        let quadric = Quadric::new(CYLINDER, DVec3::ZERO, DVec3::ZERO, Material::default());

        // Leading coefficient vanishes: treated as no hit
        let ray = Ray::new(DVec3::new(0.0, 0.0, -10.0), DVec3::Z);
        assert!(quadric.intersect(&ray).is_none());
    }

    #[test]
    fn test_quadric_normal_is_gradient() {
        let quadric = Quadric::new(CYLINDER, DVec3::ZERO, DVec3::ZERO, Material::default());

        assert_eq!(quadric.normal_at(DVec3::new(5.0, 0.0, 3.0)), DVec3::X);
        assert_eq!(quadric.normal_at(DVec3::new(0.0, -5.0, -8.0)), -DVec3::Y);
    }

    #[test]
    fn test_quadric_miss() {
        let quadric = Quadric::new(SPHERE, DVec3::ZERO, DVec3::ZERO, Material::default());
        let ray = Ray::new(DVec3::new(5.0, 0.0, 10.0), DVec3::new(0.0, 0.0, -1.0));
        assert!(quadric.intersect(&ray).is_none());
    }
}
