//! The built-in demo scene.

use std::f32::consts::FRAC_PI_4;

use lumen_math::Vec3;

use crate::{CameraDescription, LightDescription, Material, SceneDescription, ShapeDescription};

/// Columns and rows of the background sphere wall.
const WALL_COLUMNS: usize = 20;
const WALL_ROWS: usize = 10;

impl SceneDescription {
    /// Glass sphere and a mirror next to each other on a huge ground sphere,
    /// in front of a wall of small white spheres, lit by a white and a dim
    /// reddish light.
    pub fn demo() -> Self {
        let mut scene = SceneDescription {
            camera: CameraDescription::default(),
            ..Default::default()
        };

        scene.add_shape(ShapeDescription::sphere(
            Vec3::new(0.0, -1000.0, 10.0),
            997.0,
            Vec3::splat(0.5),
            Material::Diffuse,
        ));
        scene.add_shape(ShapeDescription::sphere(
            Vec3::new(3.5, 0.0, 10.0),
            3.0,
            Vec3::ONE,
            Material::Refractive,
        ));

        // Mirror quad, rotated 45 degrees about Y around (-3.5, 0, 10)
        let (sin, cos) = FRAC_PI_4.sin_cos();
        let a = Vec3::new(-3.5 - sin * 3.0, 3.0, 10.0 - cos * 3.0);
        let b = Vec3::new(-3.5 - sin * 3.0, -3.0, 10.0 - cos * 3.0);
        let c = Vec3::new(-3.5 + sin * 3.0, 3.0, 10.0 + cos * 3.0);
        let d = Vec3::new(-3.5 + sin * 3.0, -3.0, 10.0 + cos * 3.0);
        scene.add_shape(ShapeDescription::triangle(a, b, c, Vec3::ONE, Material::Reflective));
        scene.add_shape(ShapeDescription::triangle(b, d, c, Vec3::ONE, Material::Reflective));

        for i in 0..WALL_COLUMNS * WALL_ROWS {
            let x = -20.0 + 2.0 * (i % WALL_COLUMNS) as f32;
            let y = -2.0 + 2.0 * (i / WALL_COLUMNS) as f32;
            scene.add_shape(ShapeDescription::sphere(
                Vec3::new(x, y, 20.0),
                1.0,
                Vec3::ONE,
                Material::Diffuse,
            ));
        }

        scene.add_light(LightDescription::new(Vec3::new(-10.0, 3.0, 5.0), Vec3::ONE));
        scene.add_light(LightDescription::new(
            Vec3::new(10.0, 3.0, 7.5),
            Vec3::new(0.5, 0.25, 0.25),
        ));

        scene
    }
}
