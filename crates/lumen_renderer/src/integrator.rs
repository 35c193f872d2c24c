//! Recursive reflection and refraction.
//!
//! Diffuse hits end a path with direct lighting. Mirror and glass hits
//! spawn secondary rays until `MAX_DEPTH` is exceeded, at which point a flat
//! grey stands in for the light that was not traced.

use crate::{
    material::{reflect, refract, schlick},
    scene::Scene,
    shading::direct_lighting,
    shape::{Hit, Shape, Side},
    Color, Material,
};
use lumen_math::{unit, Ray, Vec3};

/// Deepest recursion level that is still traced.
pub const MAX_DEPTH: u32 = 9;

/// Returned in place of tracing once the depth limit is exceeded.
pub const DEPTH_FALLBACK: Color = Color::new(0.2, 0.2, 0.2);

/// Ratio of refractive indices outside / inside of every refractive shape.
pub const RELATIVE_IOR: f32 = 1.0 / 1.5;

/// Radiance leaving the hit point of `ray` towards its origin.
///
/// Dispatches on the material of the hit shape: diffuse shapes get direct
/// lighting only, the others recurse with `depth`.
pub fn shade(scene: &Scene, ray: &Ray, hit: &Hit<'_>, depth: u32) -> Color {
    let point = ray.at(hit.distance);
    if hit.shape.material().is_specular() {
        trace_specular(scene, point, ray.direction, ray.origin, hit.shape, depth)
    } else {
        direct_lighting(scene, point, ray.origin, hit.shape)
    }
}

/// Radiance at `point` on a mirror or glass `shape`, reached by a ray
/// travelling along `incoming` from `origin`.
///
/// The result is the direct lighting at the point plus the reflected and
/// transmitted light weighted by the Fresnel mix. Shapes that are not
/// refractive reflect everything.
pub fn trace_specular(
    scene: &Scene,
    point: Vec3,
    incoming: Vec3,
    origin: Vec3,
    shape: &dyn Shape,
    depth: u32,
) -> Color {
    if depth > MAX_DEPTH {
        return DEPTH_FALLBACK;
    }

    let incoming = unit(incoming);
    let normal = unit(shape.normal(point));

    let reflected = reflection(scene, point, incoming, normal, depth);
    let (transmitted, mix) = if shape.material() == Material::Refractive {
        transmission(scene, point, incoming, normal, shape, depth)
    } else {
        (Color::ZERO, 1.0)
    };

    direct_lighting(scene, point, origin, shape) + reflected * mix + transmitted * (1.0 - mix)
}

fn reflection(scene: &Scene, point: Vec3, incoming: Vec3, normal: Vec3, depth: u32) -> Color {
    let n = if normal.dot(incoming) > 0.0 { -normal } else { normal };
    let direction = unit(reflect(incoming, n));
    follow(scene, &Ray::new(point, direction), depth)
}

/// Returns the transmitted light and the Fresnel mix coefficient.
fn transmission(
    scene: &Scene,
    point: Vec3,
    incoming: Vec3,
    normal: Vec3,
    shape: &dyn Shape,
    depth: u32,
) -> (Color, f32) {
    let cos = normal.dot(incoming);
    if cos == 0.0 {
        return (Color::ZERO, 1.0);
    }

    let entering = cos < 0.0;
    let (eta, n) = if entering {
        (RELATIVE_IOR, normal)
    } else {
        (1.0 / RELATIVE_IOR, -normal)
    };
    let mix = schlick(cos.abs(), RELATIVE_IOR);

    let Some(direction) = refract(incoming, n, eta) else {
        return (Color::ZERO, mix);
    };

    let color = if entering {
        // Continue through the same shape to where the ray leaves it
        let inside = Ray::new(point, direction);
        match shape.intersect(&inside, Side::Far) {
            Some(distance) if distance > 0.0 => trace_specular(
                scene,
                inside.at(distance),
                direction,
                point,
                shape,
                depth + 1,
            ),
            _ => Color::ZERO,
        }
    } else {
        follow(scene, &Ray::new(point, direction), depth)
    };

    (color, mix)
}

/// Light arriving at a secondary ray's origin from whatever it hits first.
fn follow(scene: &Scene, ray: &Ray, depth: u32) -> Color {
    match scene.closest_hit(ray) {
        Some(hit) => shade(scene, ray, &hit, depth + 1),
        None => Color::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{reflect, refract, schlick, PointLight, Sphere, Triangle};

    fn mirror(a: Vec3, b: Vec3, c: Vec3) -> Box<dyn Shape> {
        Box::new(Triangle::new(a, b, c, Color::ONE, Material::Reflective))
    }

    #[test]
    fn test_depth_limit_returns_fallback() {
        let mut scene = Scene::new();
        let glass = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, Color::ONE, Material::Refractive);
        scene.add_shape(Box::new(glass.clone()));
        scene.add_light(PointLight::new(Vec3::new(0.0, 5.0, 0.0), Color::ONE));

        let color = trace_specular(
            &scene,
            Vec3::new(0.0, 0.0, 4.0),
            Vec3::Z,
            Vec3::ZERO,
            &glass,
            MAX_DEPTH + 1,
        );
        assert_eq!(color, DEPTH_FALLBACK);
    }

    #[test]
    fn test_facing_mirrors_terminate() {
        // Two parallel mirrors facing each other bounce a ray forever
        let mut scene = Scene::new();
        scene.add_shape(mirror(
            Vec3::new(-10.0, -10.0, 0.0),
            Vec3::new(10.0, -10.0, 0.0),
            Vec3::new(0.0, 10.0, 0.0),
        ));
        scene.add_shape(mirror(
            Vec3::new(-10.0, -10.0, 5.0),
            Vec3::new(10.0, -10.0, 5.0),
            Vec3::new(0.0, 10.0, 5.0),
        ));
        let eye = Vec3::new(0.0, 0.0, 2.5);
        let ray = Ray::new(eye, Vec3::Z);
        let hit = scene.closest_hit(&ray).unwrap();
        assert_eq!(hit.index, 1);

        // No lights: everything but the depth fallback is black
        let color = shade(&scene, &ray, &hit, 0);
        assert_eq!(color, DEPTH_FALLBACK);
    }

    #[test]
    fn test_mirror_reflects_diffuse_shading() {
        let mut scene = Scene::new();
        // Mirror at z=10 facing the eye
        scene.add_shape(mirror(
            Vec3::new(-10.0, -10.0, 10.0),
            Vec3::new(10.0, -10.0, 10.0),
            Vec3::new(0.0, 10.0, 10.0),
        ));
        // Diffuse ball behind the eye, only visible in the mirror
        let ball = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, Color::ONE, Material::Diffuse);
        scene.add_shape(Box::new(ball));
        scene.add_light(PointLight::new(Vec3::new(0.0, 0.0, 2.0), Color::ONE));

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let hit = scene.closest_hit(&ray).unwrap();
        assert_eq!(hit.index, 0);

        let color = shade(&scene, &ray, &hit, 0);

        // The reflected ray returns along -Z and hits the lit face of the ball
        let ball_point = Vec3::new(0.0, 0.0, -4.0);
        let expected = direct_lighting(
            &scene,
            ball_point,
            Vec3::new(0.0, 0.0, 10.0),
            scene.shapes()[1].as_ref(),
        );
        assert!(expected.x > 0.0);
        // The mirror adds its own highlight on top of the reflection
        let own = direct_lighting(&scene, ray.at(hit.distance), ray.origin, hit.shape);
        assert!((color - (own + expected)).length() < 1e-4);
    }

    #[test]
    fn test_glass_transmits_background() {
        let mut scene = Scene::new();
        scene.add_shape(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, 5.0),
            1.0,
            Color::ONE,
            Material::Refractive,
        )));
        // Diffuse wall behind the glass
        scene.add_shape(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, 120.0),
            100.0,
            Color::ONE,
            Material::Diffuse,
        )));
        scene.add_light(PointLight::new(Vec3::new(0.0, 0.0, 8.0), Color::ONE));

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let hit = scene.closest_hit(&ray).unwrap();
        assert_eq!(hit.index, 0);

        let color = shade(&scene, &ray, &hit, 0);

        // Head-on, 96% of the wall's light is transmitted through both faces
        let wall_point = Vec3::new(0.0, 0.0, 20.0);
        let wall = direct_lighting(
            &scene,
            wall_point,
            Vec3::new(0.0, 0.0, 6.0),
            scene.shapes()[1].as_ref(),
        );
        assert!(wall.x > 0.0);
        assert!(color.x >= 0.96 * 0.96 * wall.x * 0.99);
        assert!(color.is_finite());
    }

    #[test]
    fn test_reflective_is_pure_reflection() {
        // A reflective sphere seen against nothing shows only its highlight
        let mut scene = Scene::new();
        let ball = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, Color::ONE, Material::Reflective);
        scene.add_shape(Box::new(ball.clone()));
        scene.add_light(PointLight::new(Vec3::new(0.0, 0.0, 0.0), Color::ONE));

        let point = Vec3::new(0.0, 0.0, 4.0);
        let color = trace_specular(&scene, point, Vec3::Z, Vec3::ZERO, &ball, 0);
        let direct = direct_lighting(&scene, point, Vec3::ZERO, &ball);
        assert_eq!(color, direct);
        assert!((direct - Color::ONE).length() < 1e-4);
    }

    #[test]
    fn test_oblique_glass_blends_by_fresnel() {
        let glass = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, Color::ONE, Material::Refractive);
        let mut scene = Scene::new();
        scene.add_shape(Box::new(glass.clone()));
        // Wall to the right catches the reflection, a huge backdrop the
        // transmitted light
        scene.add_shape(Box::new(Sphere::new(
            Vec3::new(30.0, 0.0, 25.0),
            20.0,
            Color::new(0.8, 0.6, 0.4),
            Material::Diffuse,
        )));
        scene.add_shape(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, 1030.0),
            1000.0,
            Color::new(0.2, 0.4, 0.9),
            Material::Diffuse,
        )));
        scene.add_light(PointLight::new(Vec3::new(5.0, 5.0, 5.0), Color::ONE));

        let ray = Ray::new(Vec3::new(0.9, 0.0, 0.0), Vec3::Z);
        let hit = scene.closest_hit(&ray).unwrap();
        assert_eq!(hit.index, 0);
        let point = ray.at(hit.distance);
        let normal = unit(glass.normal(point));
        let cos = normal.dot(Vec3::Z);
        assert!(cos < -0.4 && cos > -0.5);

        let mix = schlick(cos.abs(), RELATIVE_IOR);
        assert!(mix > 0.09 && mix < 0.1);

        let bounce = Ray::new(point, unit(reflect(Vec3::Z, normal)));
        let bounce_hit = scene.closest_hit(&bounce).unwrap();
        assert_eq!(bounce_hit.index, 1);
        let reflected = shade(&scene, &bounce, &bounce_hit, 1);

        let inside = refract(Vec3::Z, normal, RELATIVE_IOR).unwrap();
        let exit = glass.intersect(&Ray::new(point, inside), Side::Far).unwrap();
        let transmitted = trace_specular(
            &scene,
            point + inside * exit,
            inside,
            point,
            &glass,
            1,
        );

        // Both paths carry light and differ, so the weights matter
        assert!(reflected.x > 0.5);
        assert!(transmitted.z > 0.2);
        assert!((reflected - transmitted).length() > 0.1);

        let direct = direct_lighting(&scene, point, ray.origin, &glass);
        let expected = direct + reflected * mix + transmitted * (1.0 - mix);
        let color = shade(&scene, &ray, &hit, 0);
        assert!((color - expected).length() < 1e-5);
    }

    #[test]
    fn test_grazing_exit_reflects_internally() {
        let glass = Sphere::new(Vec3::ZERO, 1.0, Color::ONE, Material::Refractive);
        let mut scene = Scene::new();
        scene.add_shape(Box::new(glass.clone()));
        scene.add_light(PointLight::new(Vec3::new(0.6, 0.0, -0.2), Color::ONE));

        // Leaving through the top at a shallow angle from inside
        let point = Vec3::new(0.0, 0.0, 1.0);
        let incoming = unit(Vec3::new(1.0, 0.0, 0.3));
        let origin = point - incoming * 0.5;
        let normal = unit(glass.normal(point));
        let cos = normal.dot(incoming);
        assert!(refract(incoming, -normal, 1.0 / RELATIVE_IOR).is_none());

        let (transmitted, mix) = transmission(&scene, point, incoming, normal, &glass, 0);
        assert_eq!(transmitted, Color::ZERO);
        assert!((mix - schlick(cos, RELATIVE_IOR)).abs() < 1e-6);
        assert!(mix > 0.2 && mix < 1.0);

        let reflected = reflection(&scene, point, incoming, normal, 0);
        let direct = direct_lighting(&scene, point, origin, &glass);
        assert!(reflected.x > 0.05);

        let color = trace_specular(&scene, point, incoming, origin, &glass, 0);
        assert!((color - (direct + reflected * mix)).length() < 1e-5);
        // Only part of the internal reflection makes it into the result
        assert!((color - (direct + reflected)).length() > 0.05);
    }
}
