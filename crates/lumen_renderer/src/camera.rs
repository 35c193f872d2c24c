//! Camera for primary ray generation.
//!
//! The camera sits at `eye` and always looks down +Z; there is no look-at
//! transform. Pixel rows are numbered bottom-up: row 0 maps to the lowest
//! view-plane coordinate.

use lumen_core::CameraDescription;
use lumen_math::{Ray, Vec3};

/// Fixed forward-facing pinhole camera.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    eye: Vec3,
    forward_distance: f32,
    vfov: f32, // Vertical field of view in degrees

    // Cached computed values (set by initialize())
    half_width: f32,
    half_height: f32,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        let mut camera = Self {
            image_width: 800,
            image_height: 600,
            eye: Vec3::ZERO,
            forward_distance: 1.0,
            vfov: 65.0,
            half_width: 0.0,
            half_height: 0.0,
        };
        camera.initialize();
        camera
    }

    /// Build an initialized camera from a scene description.
    pub fn from_description(desc: &CameraDescription) -> Self {
        let mut camera = Self::new()
            .with_resolution(desc.width, desc.height)
            .with_eye(desc.eye)
            .with_lens(desc.fov_y_degrees, desc.forward_distance);
        camera.initialize();
        camera
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set camera position.
    pub fn with_eye(mut self, eye: Vec3) -> Self {
        self.eye = eye;
        self
    }

    /// Set the vertical field of view (degrees) and the view plane distance.
    pub fn with_lens(mut self, vfov: f32, forward_distance: f32) -> Self {
        self.vfov = vfov;
        self.forward_distance = forward_distance;
        self
    }

    /// Initialize the camera (must be called after changing settings).
    pub fn initialize(&mut self) {
        self.half_height = self.forward_distance * (self.vfov.to_radians() / 2.0).tan();
        self.half_width =
            self.half_height * (self.image_width as f32 / self.image_height.max(1) as f32);
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Generate the primary ray through the center of pixel (x, y).
    ///
    /// The direction is not normalized; its z component is the forward
    /// distance.
    pub fn primary_ray(&self, x: u32, y: u32) -> Ray {
        let u = -self.half_width
            + 2.0 * self.half_width * (x as f32 + 0.5) / self.image_width as f32;
        let v = -self.half_height
            + 2.0 * self.half_height * (y as f32 + 0.5) / self.image_height as f32;

        Ray::new(self.eye, Vec3::new(u, v, self.forward_distance))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
