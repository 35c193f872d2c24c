//! Point lights.

use crate::Color;
use lumen_core::LightDescription;
use lumen_math::Vec3;

/// An infinitely small light emitting `color` in all directions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    /// Intensity per channel, not normalized
    pub color: Color,
}

impl PointLight {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self { position, color }
    }
}

impl From<&LightDescription> for PointLight {
    fn from(desc: &LightDescription) -> Self {
        Self::new(desc.position, desc.color)
    }
}
