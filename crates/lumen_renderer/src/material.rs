//! Material classes and the optics helpers the integrator builds on.

use lumen_math::{unit, Vec3};

pub use lumen_core::Material;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit direction `d` through a surface whose unit normal `n`
/// faces against `d`, with `eta` the ratio of refractive indices
/// (incident over transmitted).
///
/// Returns `None` on total internal reflection.
#[inline]
pub fn refract(d: Vec3, n: Vec3, eta: f32) -> Option<Vec3> {
    let cos_i = -d.dot(n);
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k <= 0.0 {
        return None;
    }
    Some(unit(eta * d + (eta * cos_i - k.sqrt()) * n))
}

/// Schlick's approximation for reflectance
#[inline]
pub fn schlick(cosine: f32, ior: f32) -> f32 {
    let r0 = ((ior - 1.0) / (ior + 1.0)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
