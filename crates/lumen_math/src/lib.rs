//! Math types shared by the lumen crates.
//!
//! `Vec3` from glam plays the role of the 3-component vector type throughout
//! the engine.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;

pub use interval::Interval;
pub use ray::Ray;

/// Normalize `v`, mapping a zero-length vector to zero instead of NaN.
#[inline]
pub fn unit(v: Vec3) -> Vec3 {
    v.normalize_or_zero()
}
