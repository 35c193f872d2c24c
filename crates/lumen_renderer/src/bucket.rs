//! Tiling of the frame into buckets.
//!
//! Buckets are independent units of work for the rayon pool. Every bucket
//! fills its own pixel vector, which the renderer copies into the frame
//! once all buckets are done.

use crate::renderer::{color_to_rgb, render_pixel, CancelToken};
use crate::{Camera, Scene};

/// Default bucket edge length in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// A rectangle of pixels, clipped to the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Position in render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Squared distance of the bucket center from the frame center, in
    /// doubled pixel units so it stays integral.
    fn center_distance(&self, frame_width: u32, frame_height: u32) -> i64 {
        let dx = i64::from(2 * self.x + self.width) - i64::from(frame_width);
        let dy = i64::from(2 * self.y + self.height) - i64::from(frame_height);
        dx * dx + dy * dy
    }
}

/// Split a `width` x `height` frame into buckets of at most `bucket_size`
/// pixels per side.
///
/// Buckets are ordered from the center of the frame outwards so the middle
/// of the picture finishes first. Equally distant buckets keep scanline
/// order.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let size = bucket_size.max(1) as usize;

    let mut buckets: Vec<Bucket> = (0..height)
        .step_by(size)
        .flat_map(|y| {
            (0..width).step_by(size).map(move |x| {
                let bw = (size as u32).min(width - x);
                let bh = (size as u32).min(height - y);
                Bucket::new(x, y, bw, bh, 0)
            })
        })
        .collect();

    buckets.sort_by_key(|b| b.center_distance(width, height));
    for (index, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = index;
    }

    log::debug!(
        "Split {}x{} frame into {} buckets of {}px",
        width,
        height,
        buckets.len(),
        size
    );
    buckets
}

/// Pixels of one finished bucket, row-major within the bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    pub pixels: Vec<[u8; 3]>,
}

/// Render every pixel of `bucket`.
///
/// Returns `None` when `cancel` fires; the token is polled before each row.
pub fn render_bucket(
    bucket: &Bucket,
    scene: &Scene,
    camera: &Camera,
    cancel: &CancelToken,
) -> Option<BucketResult> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for y in bucket.y..bucket.y + bucket.height {
        if cancel.is_cancelled() {
            return None;
        }
        pixels.extend(
            (bucket.x..bucket.x + bucket.width)
                .map(|x| color_to_rgb(render_pixel(scene, camera, x, y))),
        );
    }

    log::trace!("Bucket {} done", bucket.index);
    Some(BucketResult {
        bucket: *bucket,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Material, PointLight, Sphere, Vec3};

    #[test]
    fn test_buckets_cover_frame_once() {
        let (width, height) = (100, 70);
        let buckets = generate_buckets(width, height, 32);
        assert_eq!(buckets.len(), 4 * 3);

        let mut covered = vec![0u8; (width * height) as usize];
        for b in &buckets {
            for y in b.y..b.y + b.height {
                for x in b.x..b.x + b.width {
                    covered[(y * width + x) as usize] += 1;
                }
            }
        }
        assert!(covered.iter().all(|&c| c == 1));
    }

    #[test]
    fn test_edge_buckets_are_clipped() {
        let buckets = generate_buckets(100, 30, 64);
        assert_eq!(buckets.len(), 2);
        assert!(buckets.iter().any(|b| b.x == 64 && b.width == 36));
        assert!(buckets.iter().all(|b| b.height == 30));
    }

    #[test]
    fn test_center_bucket_first() {
        let buckets = generate_buckets(150, 150, 50);
        assert_eq!((buckets[0].x, buckets[0].y), (50, 50));

        // Corners come last
        let last = buckets.last().unwrap();
        assert!(last.x != 50 && last.y != 50);
        assert!(buckets.iter().enumerate().all(|(i, b)| b.index == i));
    }

    #[test]
    fn test_zero_bucket_size_is_one_pixel() {
        let buckets = generate_buckets(3, 2, 0);
        assert_eq!(buckets.len(), 6);
        assert!(buckets.iter().all(|b| b.pixel_count() == 1));
    }

    #[test]
    fn test_render_bucket() {
        let mut scene = Scene::new();
        scene.add_shape(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, 10.0),
            3.0,
            Color::ONE,
            Material::Diffuse,
        )));
        scene.add_light(PointLight::new(Vec3::ZERO, Color::ONE));
        let mut camera = Camera::new().with_resolution(16, 16);
        camera.initialize();

        let bucket = Bucket::new(6, 6, 4, 4, 0);
        let result = render_bucket(&bucket, &scene, &camera, &CancelToken::new()).unwrap();

        assert_eq!(result.pixels.len(), 16);
        // The middle of the frame looks straight at the lit sphere
        assert!(result.pixels.iter().all(|p| p[0] > 0));
    }

    #[test]
    fn test_render_bucket_cancelled() {
        let cancel = CancelToken::new();
        cancel.cancel();

        let bucket = Bucket::new(0, 0, 8, 8, 0);
        assert!(render_bucket(&bucket, &Scene::new(), &Camera::new(), &cancel).is_none());
    }
}
