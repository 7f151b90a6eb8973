//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::hittable::{Hittable, HIT_RANGE};
use lumo_core::Material;
use lumo_math::{DVec3, Ray};

/// Determinants below this mean the ray runs parallel to the triangle.
const PARALLEL_EPSILON: f64 = 1e-6;

/// A triangle primitive.
#[derive(Clone, Debug)]
pub struct Triangle {
    /// Vertices, in winding order
    a: DVec3,
    b: DVec3,
    c: DVec3,
    /// Pre-computed face normal, (b - a) x (c - a)
    normal: DVec3,
    material: Material,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(a: DVec3, b: DVec3, c: DVec3, material: Material) -> Self {
        let normal = (b - a).cross(c - a).normalize_or_zero();

        Self {
            a,
            b,
            c,
            normal,
            material,
        }
    }
}

impl Hittable for Triangle {
    /// Möller-Trumbore ray-triangle intersection algorithm.
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let edge1 = self.b - self.a;
        let edge2 = self.c - self.a;

        let h = ray.direction().cross(edge2);
        let det = edge1.dot(h);

        // Ray is parallel to triangle
        if det.abs() < PARALLEL_EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = ray.origin() - self.a;
        let u = inv_det * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = inv_det * ray.direction().dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = inv_det * edge2.dot(q);
        HIT_RANGE.surrounds(t).then_some(t)
    }

    fn normal_at(&self, _point: DVec3) -> DVec3 {
        self.normal
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn vertices() -> (DVec3, DVec3, DVec3) {
        (
            DVec3::new(-1.0, -1.0, -1.0),
            DVec3::new(1.0, -1.0, -1.0),
            DVec3::new(0.0, 1.0, -1.0),
        )
    }

    #[test]
    fn test_triangle_hit() {
        let (a, b, c) = vertices();
        let tri = Triangle::new(a, b, c, Material::default());

        // Ray pointing at triangle center
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(tri.intersect(&ray).unwrap(), 1.0);
    }

    #[test]
    fn test_triangle_miss() {
        let (a, b, c) = vertices();
        let tri = Triangle::new(a, b, c, Material::default());

        // Ray pointing away
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, 1.0));
        assert!(tri.intersect(&ray).is_none());

        // Outside the edges
        let ray = Ray::new(DVec3::new(2.0, 2.0, 0.0), DVec3::new(0.0, 0.0, -1.0));
        assert!(tri.intersect(&ray).is_none());
    }

    #[test]
    fn test_triangle_parallel_ray() {
        let (a, b, c) = vertices();
        let tri = Triangle::new(a, b, c, Material::default());

        let ray = Ray::new(DVec3::new(0.0, 0.0, -1.0), DVec3::X);
        assert!(tri.intersect(&ray).is_none());
    }

    #[test]
    fn test_triangle_winding_only_flips_normal() {
        let (a, b, c) = vertices();
        let tri = Triangle::new(a, b, c, Material::default());
        let swapped = Triangle::new(b, a, c, Material::default());

        let origins = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(0.9, 0.9, 0.0),
            DVec3::new(-0.4, -0.8, 2.0),
            DVec3::new(0.0, 0.5, -3.0),
            DVec3::new(3.0, 0.0, 0.0),
        ];
        let directions = [
            DVec3::new(0.0, 0.0, -1.0),
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(0.1, -0.2, -1.0),
        ];

        for origin in origins {
            for direction in directions {
                let ray = Ray::new(origin, direction);
                let t1 = tri.intersect(&ray);
                let t2 = swapped.intersect(&ray);
                assert_eq!(t1.is_some(), t2.is_some(), "origin {origin:?} dir {direction:?}");
                if let (Some(t1), Some(t2)) = (t1, t2) {
                    assert_relative_eq!(t1, t2, epsilon = 1e-9);
                }
            }
        }

        assert_eq!(tri.normal_at(DVec3::ZERO), DVec3::Z);
        assert_eq!(swapped.normal_at(DVec3::ZERO), -DVec3::Z);
    }

    #[test]
    fn test_triangle_degenerate_never_hits() {
        let tri = Triangle::new(DVec3::ZERO, DVec3::X, DVec3::X * 2.0, Material::default());
        let ray = Ray::new(DVec3::new(0.5, 0.0, 1.0), DVec3::new(0.0, 0.0, -1.0));

        assert!(tri.intersect(&ray).is_none());
        assert_eq!(tri.normal_at(DVec3::ZERO), DVec3::ZERO);
    }
}
