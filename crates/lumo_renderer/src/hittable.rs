//! Hittable trait and shared intersection helpers.

use lumo_core::{Color, Material};
use lumo_math::{DVec3, Interval, Ray};

/// Hits closer than this are ignored, so secondary rays leaving a surface
/// don't report that surface again.
pub const HIT_EPSILON: f64 = 1e-6;

/// Parametric distances accepted as a hit: (HIT_EPSILON, ∞).
pub const HIT_RANGE: Interval = Interval {
    min: HIT_EPSILON,
    max: f64::INFINITY,
};

/// Capabilities shared by every surface kind.
pub trait Hittable: Send + Sync {
    /// Smallest valid distance along `ray` at which it meets the surface.
    fn intersect(&self, ray: &Ray) -> Option<f64>;

    /// Unit surface normal at a point on the surface.
    fn normal_at(&self, point: DVec3) -> DVec3;

    /// Surface material.
    fn material(&self) -> &Material;

    /// Local diffuse color at a point on the surface.
    ///
    /// Most surfaces are uniformly colored by their material.
    fn albedo_at(&self, _point: DVec3) -> Color {
        self.material().color
    }
}

/// Real roots of `a t² + b t + c = 0` in ascending order.
///
/// Returns `None` for a negative discriminant or a (near) zero leading
/// coefficient.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Option<(f64, f64)> {
    if a.abs() < 1e-12 {
        return None;
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();
    let t1 = (-b - sqrtd) / (2.0 * a);
    let t2 = (-b + sqrtd) / (2.0 * a);
    Some((t1.min(t2), t1.max(t2)))
}
