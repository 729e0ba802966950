//! Read-only food image handle shared by all detector tasks

use super::analyzer::AnalysisError;

/// Decoded RGB8 image, validated before fan-out and never mutated after.
///
/// Decoding itself belongs to the enclosing service; this type only
/// checks the precondition and exposes the cheap whole-image statistics
/// the stock detectors work from.
#[derive(Debug, Clone)]
pub struct FoodImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl FoodImage {
    /// Wrap an already-decoded RGB8 buffer without checking it. The
    /// precondition is enforced by [`FoodImage::validate`] before any
    /// detector runs.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Wrap and validate an RGB8 buffer in one step.
    pub fn from_rgb8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, AnalysisError> {
        let image = Self::new(width, height, pixels);
        image.validate()?;
        Ok(image)
    }

    /// Check the decode precondition: nonzero dimensions and a buffer
    /// matching `width * height * 3`. This is the sole failure mode of
    /// the whole analysis call.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.width == 0 || self.height == 0 {
            return Err(AnalysisError::InvalidImage(format!(
                "image has zero dimension ({}x{})",
                self.width, self.height
            )));
        }
        let expected = self.width as usize * self.height as usize * 3;
        if self.pixels.len() != expected {
            return Err(AnalysisError::InvalidImage(format!(
                "buffer length {} does not match {}x{} RGB8 (expected {expected})",
                self.pixels.len(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Iterate pixels as (r, g, b) triples.
    pub fn pixels(&self) -> impl Iterator<Item = (u8, u8, u8)> + '_ {
        self.pixels.chunks_exact(3).map(|p| (p[0], p[1], p[2]))
    }

    /// Mean of each channel over the whole image.
    pub fn mean_rgb(&self) -> [f32; 3] {
        let mut sums = [0.0f64; 3];
        for (r, g, b) in self.pixels() {
            sums[0] += r as f64;
            sums[1] += g as f64;
            sums[2] += b as f64;
        }
        let n = self.pixel_count() as f64;
        [
            (sums[0] / n) as f32,
            (sums[1] / n) as f32,
            (sums[2] / n) as f32,
        ]
    }

    /// Fraction of pixels satisfying the predicate, in [0, 1].
    pub fn fraction_where<F>(&self, mut pred: F) -> f32
    where
        F: FnMut(u8, u8, u8) -> bool,
    {
        let hits = self.pixels().filter(|&(r, g, b)| pred(r, g, b)).count();
        hits as f32 / self.pixel_count() as f32
    }

    /// Mean perceptual luma (BT.601 weights).
    pub fn luma_mean(&self) -> f32 {
        let sum: f64 = self.pixels().map(|(r, g, b)| luma(r, g, b) as f64).sum();
        (sum / self.pixel_count() as f64) as f32
    }

    /// Standard deviation of luma, a cheap texture proxy.
    pub fn luma_stddev(&self) -> f32 {
        let mean = self.luma_mean() as f64;
        let var: f64 = self
            .pixels()
            .map(|(r, g, b)| {
                let d = luma(r, g, b) as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / self.pixel_count() as f64;
        var.sqrt() as f32
    }
}

pub(crate) fn luma(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_dimension() {
        assert!(FoodImage::from_rgb8(0, 10, vec![]).is_err());
    }

    #[test]
    fn test_rejects_mismatched_buffer() {
        assert!(FoodImage::from_rgb8(2, 2, vec![0; 11]).is_err());
    }

    #[test]
    fn test_mean_rgb_uniform_image() {
        let pixels = [120u8, 60, 30].repeat(16);
        let image = FoodImage::from_rgb8(4, 4, pixels).unwrap();
        let [r, g, b] = image.mean_rgb();
        assert_eq!(r, 120.0);
        assert_eq!(g, 60.0);
        assert_eq!(b, 30.0);
        assert_eq!(image.fraction_where(|r, _, _| r > 100), 1.0);
    }
}
