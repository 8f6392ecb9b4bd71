//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and in parallel using rayon against a read-only [`PreparedScene`].

use rayon::prelude::*;

use crate::renderer::{render_pixel, ImageBuffer, PreparedScene};
use crate::Color;

/// A rectangular tile of the image, rendered as one parallel task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// Left column of the tile
    pub x: u32,
    /// Top row of the tile
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Position in render order (0 is rendered first)
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

    /// Image coordinates covered by the tile, row-major.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> {
        let Bucket {
            x, y, width, height, ..
        } = *self;
        (y..y + height).flat_map(move |py| (x..x + width).map(move |px| (px, py)))
    }

    /// Squared distance from the tile centre to `(cx, cy)`, both given in
    /// doubled pixel units so the result stays exact.
    fn distance2(&self, cx: i64, cy: i64) -> i64 {
        let dx = 2 * self.x as i64 + self.width as i64 - cx;
        let dy = 2 * self.y as i64 + self.height as i64 - cy;
        dx * dx + dy * dy
    }
}

/// Split an image into tiles of at most `bucket_size` pixels a side.
///
/// Tiles along the right and bottom edges are cropped to the image. They
/// are ordered from the image centre outward; ties keep scanline order. A
/// bucket size of zero is treated as one.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let size = bucket_size.max(1);

    let mut buckets: Vec<Bucket> = (0..height)
        .step_by(size as usize)
        .flat_map(move |y| {
            (0..width).step_by(size as usize).map(move |x| {
                Bucket::new(x, y, size.min(width - x), size.min(height - y), 0)
            })
        })
        .collect();

    let (cx, cy) = (width as i64, height as i64);
    buckets.sort_by_key(|bucket| bucket.distance2(cx, cy));

    for (index, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = index;
    }
    buckets
}

/// Colors of one rendered tile.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Row-major within the tile
    pub pixels: Vec<Color>,
}

impl BucketResult {
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }

    /// Copy the tile into a full-size image.
    pub fn write_to(&self, image: &mut ImageBuffer) {
        for ((x, y), color) in self.bucket.pixels().zip(&self.pixels) {
            image.set(x, y, *color);
        }
    }
}

/// Render one tile, row-major within the tile.
pub fn render_bucket(bucket: &Bucket, prepared: &PreparedScene) -> Vec<Color> {
    bucket
        .pixels()
        .map(|(x, y)| render_pixel(prepared, x, y))
        .collect()
}

/// Render the whole image with buckets spread over the rayon pool.
///
/// Produces the same image as [`render`](crate::render).
pub fn render_parallel(prepared: &PreparedScene) -> ImageBuffer {
    let camera = &prepared.scene().camera;
    let bucket_size = prepared.scene().config.bucket_size;
    let buckets = generate_buckets(camera.width(), camera.height(), bucket_size);

    log::debug!(
        "Rendering {} buckets on {} threads",
        buckets.len(),
        rayon::current_num_threads()
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| BucketResult::new(*bucket, render_bucket(bucket, prepared)))
        .collect();

    let mut image = ImageBuffer::new(camera.width(), camera.height());
    for result in &results {
        result.write_to(&mut image);
    }
    image
}
