//! Triangle primitive for ray tracing.
//!
//! Intersects the supporting plane first, then solves for the hit point's
//! edge coordinates (s, t) along the two edges leaving the first vertex.

use crate::{
    shape::{Shape, Side},
    Color, Material,
};
use lumen_math::{Ray, Vec3};

/// Below this |n·d| the ray is treated as parallel to the plane.
const PARALLEL_EPSILON: f32 = 1e-8;

/// A triangle primitive.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// Vertices
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// cross(v1 - v0, v2 - v0), not normalized
    normal: Vec3,
    color: Color,
    material: Material,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, color: Color, material: Material) -> Self {
        let normal = (v1 - v0).cross(v2 - v0);

        Self {
            v0,
            v1,
            v2,
            normal,
            color,
            material,
        }
    }
}

impl Shape for Triangle {
    /// Both sides report the same root; a plane has only one.
    fn intersect(&self, ray: &Ray, _side: Side) -> Option<f32> {
        let u = self.v1 - self.v0;
        let v = self.v2 - self.v0;

        // Ray-plane distance
        let w = ray.origin - self.v0;
        let mut nw = -self.normal.dot(w);
        let mut ndir = self.normal.dot(ray.direction);
        if nw < 0.0 {
            nw = -nw;
            ndir = -ndir;
        }
        if ndir.abs() < PARALLEL_EPSILON {
            return None;
        }
        let r = nw / ndir;
        if r < 0.0 {
            return None;
        }

        // Edge coordinates of the plane hit
        let w = ray.at(r) - self.v0;
        let uu = u.dot(u);
        let uv = u.dot(v);
        let vv = v.dot(v);
        let wu = w.dot(u);
        let wv = w.dot(v);
        let denom = uv * uv - uu * vv;

        let s = (uv * wv - vv * wu) / denom;
        if !(0.0..=1.0).contains(&s) {
            return None;
        }
        let t = (uv * wu - uu * wv) / denom;
        if t < 0.0 || s + t > 1.0 {
            return None;
        }

        Some(r)
    }

    fn normal(&self, _p: Vec3) -> Vec3 {
        self.normal
    }

    fn color(&self) -> Color {
        self.color
    }

    fn material(&self) -> Material {
        self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_triangle() -> Triangle {
        // Triangle in a plane parallel to XY at z=5
        Triangle::new(
            Vec3::new(-1.0, -1.0, 5.0),
            Vec3::new(1.0, -1.0, 5.0),
            Vec3::new(0.0, 1.0, 5.0),
            Color::ONE,
            Material::Reflective,
        )
    }

    /// Point with edge coordinates (s, t) on the test triangle
    fn edge_point(s: f32, t: f32) -> Vec3 {
        let tri = test_triangle();
        let (v0, v1, v2) = (tri.v0, tri.v1, tri.v2);
        v0 + s * (v1 - v0) + t * (v2 - v0)
    }

    #[test]
    fn test_hit_through_centroid() {
        let tri = test_triangle();
        let centroid = edge_point(1.0 / 3.0, 1.0 / 3.0);
        let ray = Ray::new(Vec3::ZERO, centroid);

        let r = tri.intersect(&ray, Side::Near).unwrap();
        assert!((r - 1.0).abs() < 1e-5);
        assert_eq!(tri.intersect(&ray, Side::Far), Some(r));
    }

    #[test]
    fn test_hit_from_behind() {
        let tri = test_triangle();
        let target = edge_point(0.25, 0.25);
        let origin = Vec3::new(0.0, 0.0, 10.0);
        let ray = Ray::between(origin, target);

        let r = tri.intersect(&ray, Side::Near).unwrap();
        assert!((r - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_miss_outside_edges() {
        let tri = test_triangle();

        for (s, t) in [(-0.1, 0.5), (0.5, -0.1), (0.6, 0.6), (1.1, 0.0)] {
            let ray = Ray::new(Vec3::ZERO, edge_point(s, t));
            assert!(
                tri.intersect(&ray, Side::Near).is_none(),
                "(s, t) = ({s}, {t}) should miss"
            );
        }
    }

    #[test]
    fn test_miss_plane_behind() {
        let tri = test_triangle();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(tri.intersect(&ray, Side::Near).is_none());
    }

    #[test]
    fn test_miss_parallel() {
        let tri = test_triangle();
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(tri.intersect(&ray, Side::Near).is_none());
    }

    #[test]
    fn test_normal_is_unnormalized_cross_product() {
        let tri = test_triangle();
        // (2, 0, 0) x (1, 2, 0) = (0, 0, 4)
        assert_eq!(tri.normal(Vec3::ZERO), Vec3::new(0.0, 0.0, 4.0));
    }
}
