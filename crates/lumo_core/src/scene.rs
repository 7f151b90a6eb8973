//! Scene description types for Lumo.
//!
//! This module defines the renderer-agnostic scene representation that the
//! scene file loader produces: shapes with Phong materials, point lights,
//! spotlights, and the global render limits.

use lumo_math::DVec3;

/// Color type alias (RGB, typically 0-1 but lights may exceed 1).
pub type Color = DVec3;

/// Phong lighting coefficients.
///
/// The coefficients are not required to sum to one.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coefficients {
    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub reflective: f64,
}

impl Coefficients {
    pub fn new(ambient: f64, diffuse: f64, specular: f64, reflective: f64) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            reflective,
        }
    }
}

/// Surface material for the local illumination model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Diffuse color (RGB, 0-1)
    pub color: Color,

    /// Ambient, diffuse, specular and reflective weights
    pub coefficients: Coefficients,

    /// Specular exponent
    pub shininess: u32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::new(0.5, 0.5, 0.5), // Grey default
            coefficients: Coefficients::new(0.4, 0.6, 0.0, 0.0),
            shininess: 1,
        }
    }
}

impl Material {
    /// Create a new material.
    pub fn new(color: Color, coefficients: Coefficients, shininess: u32) -> Self {
        Self {
            color,
            coefficients,
            shininess,
        }
    }

    /// Check if this material contributes mirror reflection.
    pub fn is_reflective(&self) -> bool {
        self.coefficients.reflective > 0.0
    }
}

/// An omnidirectional light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: DVec3,
    pub color: Color,
}

impl PointLight {
    pub fn new(position: DVec3, color: Color) -> Self {
        Self { position, color }
    }

    /// Unit direction from `point` toward the light.
    pub fn direction_from(&self, point: DVec3) -> DVec3 {
        (self.position - point).normalize_or_zero()
    }
}

/// A point light restricted to a cone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotLight {
    pub light: PointLight,

    /// Cone axis (unit length, or zero if given a zero vector)
    pub direction: DVec3,

    /// Half-angle of the cone in degrees
    pub cutoff_degrees: f64,
}

impl SpotLight {
    pub fn new(light: PointLight, direction: DVec3, cutoff_degrees: f64) -> Self {
        Self {
            light,
            direction: direction.normalize_or_zero(),
            cutoff_degrees,
        }
    }

    /// Angle in degrees between the cone axis and the light→point vector.
    pub fn angle_to(&self, point: DVec3) -> f64 {
        let to_point = (point - self.light.position).normalize_or_zero();
        to_point
            .dot(self.direction)
            .clamp(-1.0, 1.0)
            .acos()
            .to_degrees()
    }

    /// Check whether `point` lies inside the cone.
    pub fn illuminates(&self, point: DVec3) -> bool {
        self.angle_to(point) <= self.cutoff_degrees
    }
}

/// Geometry of a scene object as read from a scene description.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Sphere {
        center: DVec3,
        radius: f64,
    },
    Triangle {
        a: DVec3,
        b: DVec3,
        c: DVec3,
    },
    /// `Ax²+By²+Cz²+Dxy+Exz+Fyz+Gx+Hy+Iz+J = 0`, clipped to a box.
    Quadric {
        coefficients: [f64; 10],
        corner: DVec3,
        /// Length, width, height; zero or negative means unbounded on that axis
        extent: DVec3,
    },
}

impl Shape {
    /// Short name used in logs and scene files.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Sphere { .. } => "sphere",
            Shape::Triangle { .. } => "triangle",
            Shape::Quadric { .. } => "general",
        }
    }
}

/// A shape paired with its material.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    pub shape: Shape,
    pub material: Material,
}

/// Everything a scene file describes.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneDescription {
    /// Maximum number of reflection bounces (primary hits are depth 1)
    pub max_depth: u32,

    /// Output image is `image_size` x `image_size`
    pub image_size: u32,

    pub objects: Vec<SceneObject>,
    pub point_lights: Vec<PointLight>,
    pub spot_lights: Vec<SpotLight>,
}

impl SceneDescription {
    /// Create an empty description.
    pub fn new(max_depth: u32, image_size: u32) -> Self {
        Self {
            max_depth,
            image_size,
            objects: Vec::new(),
            point_lights: Vec::new(),
            spot_lights: Vec::new(),
        }
    }

    /// Count objects of the given kind (see [`Shape::kind`]).
    pub fn count_kind(&self, kind: &str) -> usize {
        self.objects
            .iter()
            .filter(|object| object.shape.kind() == kind)
            .count()
    }

    /// Log a one-line summary of the scene contents.
    pub fn log_summary(&self) {
        log::info!(
            "Loaded {} spheres, {} triangles, {} quadrics, {} point lights, {} spotlights",
            self.count_kind("sphere"),
            self.count_kind("triangle"),
            self.count_kind("general"),
            self.point_lights.len(),
            self.spot_lights.len()
        );
    }
}
