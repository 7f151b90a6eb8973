//! Sphere primitive for ray tracing.

use crate::hittable::{solve_quadratic, Hittable, HIT_RANGE};
use lumo_core::Material;
use lumo_math::{DVec3, Ray};

/// A sphere primitive.
#[derive(Clone, Debug)]
pub struct Sphere {
    center: DVec3,
    radius: f64,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. Only the magnitude of `radius` matters.
    pub fn new(center: DVec3, radius: f64, material: Material) -> Self {
        Self {
            center,
            radius: radius.abs(),
            material,
        }
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let b = 2.0 * oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        // Find the nearest root in the acceptable range
        let (t1, t2) = solve_quadratic(a, b, c)?;
        [t1, t2].into_iter().find(|&t| HIT_RANGE.surrounds(t))
    }

    fn normal_at(&self, point: DVec3) -> DVec3 {
        (point - self.center).normalize_or_zero()
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
