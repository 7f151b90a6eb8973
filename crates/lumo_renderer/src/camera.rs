//! Pinhole camera for primary ray generation.
//!
//! The camera looks through a view window of `window_width` x
//! `window_height` world units, placed far enough in front of the eye that
//! it spans the vertical field of view. One ray is cast through the center
//! of each pixel.

use lumo_core::CameraSettings;
use lumo_math::{DQuat, DVec3, Ray};

/// Camera for generating rays into the scene.
#[derive(Clone, Debug)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    eye: DVec3,
    look: DVec3,
    up: DVec3,
    right: DVec3,

    // View window
    fov_y: f64, // Vertical field of view in degrees
    window_width: f64,
    window_height: f64,

    // Cached computed values (set by initialize())
    top_left: DVec3,
    du: f64,
    dv: f64,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        let defaults = CameraSettings::default();
        Self {
            image_width: 500,
            image_height: 500,
            eye: DVec3::from_array(defaults.eye),
            look: DVec3::from_array(defaults.look),
            up: DVec3::from_array(defaults.up),
            right: DVec3::X,
            fov_y: defaults.fov_y,
            window_width: defaults.window_width,
            window_height: defaults.window_height,
            // Cached values (initialized to defaults)
            top_left: DVec3::ZERO,
            du: 0.0,
            dv: 0.0,
        }
    }

    /// Create a camera from render settings.
    pub fn from_settings(settings: &CameraSettings) -> Self {
        Self::new()
            .with_position(
                DVec3::from_array(settings.eye),
                DVec3::from_array(settings.look),
                DVec3::from_array(settings.up),
            )
            .with_fov(settings.fov_y)
            .with_window(settings.window_width, settings.window_height)
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set eye position, view direction and up hint.
    pub fn with_position(mut self, eye: DVec3, look: DVec3, up: DVec3) -> Self {
        self.eye = eye;
        self.look = look;
        self.up = up;
        self
    }

    /// Set vertical field of view in degrees.
    pub fn with_fov(mut self, fov_y: f64) -> Self {
        self.fov_y = fov_y;
        self
    }

    /// Set the view window size in world units.
    pub fn with_window(mut self, width: f64, height: f64) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    pub fn initialize(&mut self) {
        self.orthonormalize();

        // Distance at which the window spans the vertical field of view
        let half_fov = (self.fov_y / 2.0).to_radians();
        let distance = (self.window_height / 2.0) / half_fov.tan();

        self.du = self.window_width / self.image_width.max(1) as f64;
        self.dv = self.window_height / self.image_height.max(1) as f64;

        let window_top_left = self.eye + self.look * distance
            - self.right * (self.window_width / 2.0)
            + self.up * (self.window_height / 2.0);

        // Shift to the center of pixel (0, 0)
        self.top_left = window_top_left + self.right * (self.du / 2.0) - self.up * (self.dv / 2.0);
    }

    /// Generate the ray through the center of pixel (i, j).
    pub fn get_ray(&self, i: u32, j: u32) -> Ray {
        let target =
            self.top_left + self.right * (i as f64 * self.du) - self.up * (j as f64 * self.dv);
        Ray::new(self.eye, target - self.eye)
    }

    /// Re-derive `right` and `up` so the basis is orthonormal around `look`.
    fn orthonormalize(&mut self) {
        self.look = self.look.normalize_or_zero();
        self.right = self.look.cross(self.up).normalize_or_zero();
        self.up = self.right.cross(self.look);
    }

    /// Move the eye by a world-space offset.
    pub fn translate(&mut self, offset: DVec3) {
        self.eye += offset;
        self.initialize();
    }

    /// Move the eye along the view direction.
    pub fn move_forward(&mut self, distance: f64) {
        self.translate(self.look * distance);
    }

    /// Move the eye along the camera's right axis.
    pub fn move_right(&mut self, distance: f64) {
        self.translate(self.right * distance);
    }

    /// Rotate left/right around the up axis.
    pub fn yaw(&mut self, radians: f64) {
        let rotation = DQuat::from_axis_angle(self.up, radians);
        self.look = rotation * self.look;
        self.initialize();
    }

    /// Rotate up/down around the right axis.
    pub fn pitch(&mut self, radians: f64) {
        let rotation = DQuat::from_axis_angle(self.right, radians);
        self.look = rotation * self.look;
        self.up = rotation * self.up;
        self.initialize();
    }

    /// Rotate around the view direction.
    pub fn roll(&mut self, radians: f64) {
        let rotation = DQuat::from_axis_angle(self.look, radians);
        self.up = rotation * self.up;
        self.initialize();
    }

    pub fn eye(&self) -> DVec3 {
        self.eye
    }

    pub fn look(&self) -> DVec3 {
        self.look
    }

    pub fn up(&self) -> DVec3 {
        self.up
    }

    pub fn right(&self) -> DVec3 {
        self.right
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
