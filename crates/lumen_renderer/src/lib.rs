//! Lumen Renderer - CPU Whitted-style ray tracing
//!
//! Traces one primary ray per pixel through a scene of spheres and
//! triangles lit by point lights:
//! - Closest-hit queries by linear scan over all shapes
//! - Blinn-Phong direct lighting with hard shadows
//! - Depth-bounded mirror reflection and Fresnel-blended refraction
//! - Bucketed rendering in parallel with rayon
//! - Binary PPM (P6) reading and writing

mod bucket;
mod camera;
mod integrator;
mod light;
mod material;
mod ppm;
mod renderer;
mod scene;
mod shading;
mod shape;
mod sphere;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use integrator::{shade, trace_specular, DEPTH_FALLBACK, MAX_DEPTH, RELATIVE_IOR};
pub use light::PointLight;
pub use material::{reflect, refract, schlick, Color, Material};
pub use ppm::{load_ppm, read_ppm, save_ppm, write_ppm, PpmError};
pub use renderer::{
    color_to_rgb, render, render_pixel, render_with_cancel, CancelToken, FrameBuffer, RenderConfig,
    RenderError,
};
pub use scene::{Scene, HIT_RANGE};
pub use shading::{direct_lighting, is_lit, light_contribution, light_terms, LightTerms};
pub use shape::{Hit, Shape, Side};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Interval, Ray, Vec3};
