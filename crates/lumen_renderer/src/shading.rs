//! Blinn-Phong direct illumination with hard shadows.
//!
//! Both the diffuse and the specular coefficient are 1; there is no ambient
//! term.

use crate::{light::PointLight, scene::Scene, shape::Shape, Color, Material};
use lumen_math::{unit, Ray, Vec3};

/// Specular sharpness.
const SPECULAR_EXPONENT: i32 = 10;

/// A light-to-point ray whose first hit lies at or past this fraction of
/// the way to the point counts as reaching it.
const SHADOW_RATIO: f32 = 0.99;

/// Scalar weights of one light at one surface point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightTerms {
    pub diffuse: f32,
    pub specular: f32,
}

/// Compute the diffuse and specular weights for a surface point.
///
/// `normal`, `to_viewer` and `to_light` must be unit length (or zero). The
/// normal is flipped to face the viewer first. Non-diffuse materials get no
/// diffuse weight but keep their highlight.
pub fn light_terms(normal: Vec3, to_viewer: Vec3, to_light: Vec3, material: Material) -> LightTerms {
    let n = if to_viewer.dot(normal) < 0.0 { -normal } else { normal };

    let nl = n.dot(to_light).max(0.0);
    let r = unit(2.0 * nl * n - to_light);
    let rv = r.dot(to_viewer).max(0.0);

    LightTerms {
        diffuse: if material == Material::Diffuse { nl } else { 0.0 },
        specular: rv.powi(SPECULAR_EXPONENT),
    }
}

/// Check whether `light` reaches `point` unobstructed.
pub fn is_lit(scene: &Scene, point: Vec3, light: &PointLight) -> bool {
    scene
        .closest_hit(&Ray::between(light.position, point))
        .is_some_and(|hit| hit.distance >= SHADOW_RATIO)
}

/// Light arriving from a single light at `point` on `shape`, seen from
/// `viewer`.
pub fn light_contribution(
    scene: &Scene,
    point: Vec3,
    viewer: Vec3,
    shape: &dyn Shape,
    light: &PointLight,
) -> Color {
    if !is_lit(scene, point, light) {
        return Color::ZERO;
    }

    let terms = light_terms(
        unit(shape.normal(point)),
        unit(viewer - point),
        unit(light.position - point),
        shape.material(),
    );
    let blend = shape.color() * light.color;
    blend * terms.diffuse + blend * terms.specular
}

/// Direct lighting at `point`, summed over all lights in the scene.
pub fn direct_lighting(scene: &Scene, point: Vec3, viewer: Vec3, shape: &dyn Shape) -> Color {
    scene
        .lights()
        .iter()
        .map(|light| light_contribution(scene, point, viewer, shape, light))
        .sum()
}
