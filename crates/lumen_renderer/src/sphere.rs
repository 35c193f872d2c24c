//! Sphere primitive for ray tracing.

use crate::{
    shape::{Shape, Side},
    Color, Material,
};
use lumen_math::{Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    color: Color,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, color: Color, material: Material) -> Self {
        debug_assert!(radius > 0.0, "sphere radius must be positive");
        Self {
            center,
            radius,
            color,
            material,
        }
    }
}

impl Shape for Sphere {
    fn intersect(&self, ray: &Ray, side: Side) -> Option<f32> {
        let w = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let b = 2.0 * ray.direction.dot(w);
        let c = w.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let t1 = (-b + sqrtd) / (2.0 * a);
        let t2 = (-b - sqrtd) / (2.0 * a);

        match side {
            // t2 is the smaller root unless the ray starts inside the sphere
            Side::Near if t2 > 0.0 && (t2 < t1 || t1 < 0.0) => Some(t2),
            Side::Near => Some(t1),
            Side::Far => Some(t1.max(t2)),
        }
    }

    fn normal(&self, p: Vec3) -> Vec3 {
        p - self.center
    }

    fn color(&self) -> Color {
        self.color
    }

    fn material(&self) -> Material {
        self.material
    }
}
