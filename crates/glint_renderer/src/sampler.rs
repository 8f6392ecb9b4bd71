//! Regular-grid pixel sampling.

/// Largest number of samples per pixel, a 32×32 grid.
pub const MAX_SAMPLES_PER_PIXEL: u32 = 1024;

/// Sub-pixel sample offsets laid out on an m×m grid.
///
/// A request for `n` samples is rounded up to the next square. Zero is
/// treated as one and requests above [`MAX_SAMPLES_PER_PIXEL`] are clamped
/// to it. Offsets lie
/// in [0, 1) and sit at the centres of the grid cells, so a single sample
/// lands on the pixel centre.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    size: u32,
    offsets: Vec<(f32, f32)>,
}

impl SampleGrid {
    pub fn new(samples: u32) -> Self {
        if samples > MAX_SAMPLES_PER_PIXEL {
            log::warn!(
                "{} samples per pixel requested; clamping to {}",
                samples,
                MAX_SAMPLES_PER_PIXEL
            );
        }
        let samples = samples.clamp(1, MAX_SAMPLES_PER_PIXEL);

        let mut size = 1;
        while size * size < samples {
            size += 1;
        }
        if size * size != samples {
            log::debug!("Rounding {} samples per pixel up to {}", samples, size * size);
        }

        let step = 1.0 / size as f32;
        let offsets = (0..size)
            .flat_map(|i| {
                (0..size).map(move |j| ((j as f32 + 0.5) * step, (i as f32 + 0.5) * step))
            })
            .collect();

        Self { size, offsets }
    }

    /// Edge length of the grid.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Offsets in row-major order, `(dx, dy)` within the pixel.
    pub fn offsets(&self) -> &[(f32, f32)] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

impl Default for SampleGrid {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_sample_is_centre() {
        let grid = SampleGrid::new(1);
        assert_eq!(grid.offsets(), &[(0.5, 0.5)]);
    }

    #[test]
    fn test_zero_samples_means_one() {
        assert_eq!(SampleGrid::new(0), SampleGrid::new(1));
    }

    #[test]
    fn test_rounds_up_to_square() {
        let grid = SampleGrid::new(5);
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.len(), 9);
    }

    #[test]
    fn test_huge_requests_are_clamped() {
        let _ = env_logger::builder().is_test(true).try_init();

        let grid = SampleGrid::new(u32::MAX);
        assert_eq!(grid.size(), 32);
        assert_eq!(grid.len(), MAX_SAMPLES_PER_PIXEL as usize);
        assert_eq!(SampleGrid::new(MAX_SAMPLES_PER_PIXEL + 1), grid);
    }

    #[test]
    fn test_offsets_are_cell_centres() {
        let grid = SampleGrid::new(4);
        assert_eq!(grid.offsets(), &[(0.25, 0.25), (0.75, 0.25), (0.25, 0.75), (0.75, 0.75)]);
    }
}
