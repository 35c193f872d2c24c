//! Shape trait and Hit record for ray-object intersection.

use crate::{Color, Material};
use lumen_math::{Ray, Vec3};

/// Which root of the intersection equation to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The closest positive root; used for primary, shadow and bounce rays
    Near,
    /// The farthest root; used to find where a ray inside a solid leaves it
    Far,
}

/// Trait for primitives that can be hit by rays.
pub trait Shape: Send + Sync {
    /// Intersect a ray with this shape.
    ///
    /// Returns the ray parameter of the selected root, in multiples of
    /// `ray.direction`, or `None` when the ray misses. The parameter may be
    /// negative; callers filter by their own acceptance range.
    fn intersect(&self, ray: &Ray, side: Side) -> Option<f32>;

    /// Surface normal at `p`, not necessarily unit length.
    fn normal(&self, p: Vec3) -> Vec3;

    fn color(&self) -> Color;

    fn material(&self) -> Material;
}

/// Result of a scene-wide closest-hit query.
#[derive(Clone, Copy)]
pub struct Hit<'a> {
    /// Ray parameter of the intersection
    pub distance: f32,
    /// Index of the shape in scene order
    pub index: usize,
    pub shape: &'a dyn Shape,
}

impl std::fmt::Debug for Hit<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hit")
            .field("distance", &self.distance)
            .field("index", &self.index)
            .field("material", &self.shape.material())
            .finish()
    }
}
