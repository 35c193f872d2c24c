//! Runtime scene and the closest-hit query.

use crate::{
    light::PointLight,
    shape::{Hit, Shape, Side},
    sphere::Sphere,
    triangle::Triangle,
};
use lumen_core::{SceneDescription, SceneResult, ShapeDescription};
use lumen_math::{Interval, Ray};

/// Accepted hit parameters for scene queries.
///
/// The lower bound keeps a surface from re-hitting itself due to
/// floating-point error; hits at or beyond the upper bound count as misses.
pub const HIT_RANGE: Interval = Interval::new(0.01, 999.0);

/// Shapes and lights, assembled once and read-only during a render.
#[derive(Default)]
pub struct Scene {
    shapes: Vec<Box<dyn Shape>>,
    lights: Vec<PointLight>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a description and build the runtime scene from it.
    pub fn from_description(desc: &SceneDescription) -> SceneResult<Self> {
        desc.validate()?;
        let mut scene = Self::new();

        for shape in &desc.shapes {
            match shape {
                ShapeDescription::Sphere {
                    center,
                    radius,
                    color,
                    material,
                } => scene.add_shape(Box::new(Sphere::new(*center, *radius, *color, *material))),
                ShapeDescription::Triangle {
                    vertices: [a, b, c],
                    color,
                    material,
                } => scene.add_shape(Box::new(Triangle::new(*a, *b, *c, *color, *material))),
            }
        }
        for light in &desc.lights {
            scene.add_light(light.into());
        }

        log::debug!(
            "Built scene with {} shapes and {} lights",
            scene.shapes.len(),
            scene.lights.len()
        );
        Ok(scene)
    }

    /// Add a shape to the scene.
    pub fn add_shape(&mut self, shape: Box<dyn Shape>) {
        self.shapes.push(shape);
    }

    /// Add a light to the scene.
    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn shapes(&self) -> &[Box<dyn Shape>] {
        &self.shapes
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    /// Find the closest shape hit by `ray` with a near-side parameter inside
    /// `HIT_RANGE`.
    ///
    /// Scans every shape in order; on ties the earlier shape wins.
    pub fn closest_hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        let mut closest: Option<Hit<'_>> = None;

        for (index, shape) in self.shapes.iter().enumerate() {
            let Some(distance) = shape.intersect(ray, Side::Near) else {
                continue;
            };
            if !HIT_RANGE.surrounds(distance) {
                continue;
            }
            if closest.map_or(true, |hit| distance < hit.distance) {
                closest = Some(Hit {
                    distance,
                    index,
                    shape: shape.as_ref(),
                });
            }
        }

        closest
    }
}
