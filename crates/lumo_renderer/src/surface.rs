//! The closed set of renderable surfaces.

use crate::{Floor, Hittable, Quadric, Sphere, Triangle};
use lumo_core::{Color, Material, SceneObject, Shape};
use lumo_math::{DVec3, Ray};

/// Any surface the renderer can trace.
#[derive(Clone, Debug)]
pub enum Surface {
    Sphere(Sphere),
    Triangle(Triangle),
    Quadric(Quadric),
    Floor(Floor),
}

impl Surface {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Surface::Sphere(_) => "sphere",
            Surface::Triangle(_) => "triangle",
            Surface::Quadric(_) => "quadric",
            Surface::Floor(_) => "floor",
        }
    }

    fn as_hittable(&self) -> &dyn Hittable {
        match self {
            Surface::Sphere(s) => s,
            Surface::Triangle(s) => s,
            Surface::Quadric(s) => s,
            Surface::Floor(s) => s,
        }
    }
}

impl Hittable for Surface {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        self.as_hittable().intersect(ray)
    }

    fn normal_at(&self, point: DVec3) -> DVec3 {
        self.as_hittable().normal_at(point)
    }

    fn material(&self) -> &Material {
        self.as_hittable().material()
    }

    fn albedo_at(&self, point: DVec3) -> Color {
        self.as_hittable().albedo_at(point)
    }
}

impl From<&SceneObject> for Surface {
    fn from(object: &SceneObject) -> Self {
        let material = object.material;
        match object.shape {
            Shape::Sphere { center, radius } => Surface::Sphere(Sphere::new(center, radius, material)),
            Shape::Triangle { a, b, c } => Surface::Triangle(Triangle::new(a, b, c, material)),
            Shape::Quadric {
                coefficients,
                corner,
                extent,
            } => Surface::Quadric(Quadric::new(coefficients, corner, extent, material)),
        }
    }
}

impl From<Sphere> for Surface {
    fn from(sphere: Sphere) -> Self {
        Surface::Sphere(sphere)
    }
}

impl From<Triangle> for Surface {
    fn from(triangle: Triangle) -> Self {
        Surface::Triangle(triangle)
    }
}

impl From<Quadric> for Surface {
    fn from(quadric: Quadric) -> Self {
        Surface::Quadric(quadric)
    }
}

impl From<Floor> for Surface {
    fn from(floor: Floor) -> Self {
        Surface::Floor(floor)
    }
}
