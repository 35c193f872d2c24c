//! Core ray tracing renderer.
//!
//! Traces one primary ray through the center of every pixel, shades the
//! closest hit and stores the clamped, 8-bit quantized result.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use image::RgbImage;
use lumen_math::Interval;
use rayon::prelude::*;
use thiserror::Error;

use crate::bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::integrator::shade;
use crate::{Camera, Color, Scene};

/// Errors that can stop a render.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Render was cancelled")]
    Cancelled,

    #[error("Invalid resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Edge length of the square buckets the image is split into
    pub bucket_size: u32,
    /// Render buckets on the rayon thread pool instead of the calling thread
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            bucket_size: DEFAULT_BUCKET_SIZE,
            parallel: true,
        }
    }
}

/// Shared flag that asks a running render to stop.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Row-major RGB8 image, 3 bytes per pixel.
///
/// Row 0 is the bottom scanline of the picture, matching the camera's row
/// numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl FrameBuffer {
    /// Create a new frame buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 3],
        }
    }

    /// Wrap raw RGB bytes; returns `None` if the length does not match.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        (pixels.len() == width as usize * height as usize * 3).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 3
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        let i = self.offset(x, y);
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let i = self.offset(x, y);
        self.pixels[i..i + 3].copy_from_slice(&rgb);
    }

    /// Raw bytes, suitable for blitting to a display surface.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Copy into an upright `image::RgbImage` (row 0 at the top).
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            image::Rgb(self.get(x, self.height - 1 - y))
        })
    }

    /// Save as PNG (or any other format `image` infers from the extension).
    pub fn save_image(&self, path: impl AsRef<std::path::Path>) -> image::ImageResult<()> {
        self.to_rgb_image().save(path)
    }

    fn blit(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        let row_len = bucket.width as usize;
        for (local_y, row) in result.pixels.chunks(row_len).enumerate() {
            for (local_x, rgb) in row.iter().enumerate() {
                self.set(bucket.x + local_x as u32, bucket.y + local_y as u32, *rgb);
            }
        }
    }
}

/// Convert a radiance value to 8-bit RGB, clamping each channel to [0, 1].
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let quantize = |c: f32| (255.0 * Interval::UNIT.clamp(c)) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Radiance seen through pixel (x, y). Misses are black.
pub fn render_pixel(scene: &Scene, camera: &Camera, x: u32, y: u32) -> Color {
    let ray = camera.primary_ray(x, y);
    match scene.closest_hit(&ray) {
        Some(hit) => shade(scene, &ray, &hit, 0),
        None => Color::ZERO,
    }
}

/// Render the entire scene to a frame buffer.
pub fn render(
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
) -> Result<FrameBuffer, RenderError> {
    render_with_cancel(scene, camera, config, &CancelToken::new())
}

/// Render the entire scene, stopping early once `cancel` is triggered.
pub fn render_with_cancel(
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
    cancel: &CancelToken,
) -> Result<FrameBuffer, RenderError> {
    let (width, height) = (camera.image_width, camera.image_height);
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidResolution { width, height });
    }

    let buckets = generate_buckets(width, height, config.bucket_size);
    log::info!(
        "Rendering {}x{} in {} buckets ({} shapes, {} lights, {})",
        width,
        height,
        buckets.len(),
        scene.shapes().len(),
        scene.lights().len(),
        if config.parallel { "parallel" } else { "single-threaded" }
    );
    let start = Instant::now();

    let render_one = |bucket: &Bucket| render_bucket(bucket, scene, camera, cancel);
    let results: Option<Vec<BucketResult>> = if config.parallel {
        buckets.par_iter().map(render_one).collect()
    } else {
        buckets.iter().map(render_one).collect()
    };
    let Some(results) = results else {
        log::warn!("Render cancelled after {:?}", start.elapsed());
        return Err(RenderError::Cancelled);
    };

    let mut frame = FrameBuffer::new(width, height);
    for result in &results {
        frame.blit(result);
    }

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(frame)
}
