//! Grid quantization and frequency histogram
//!
//! Each sampled channel is rounded to the nearest multiple of the
//! quantization factor, collapsing near-identical colors (anti-aliasing,
//! gradients) into one bucket.

use std::collections::HashMap;

use crate::{PaletteError, Result};

/// One histogram bucket: a quantized color and its sample count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    pub rgb: [u8; 3],
    pub count: u32,
}

/// Frequency histogram keyed by quantized color
///
/// Buckets keep the order in which their key was first seen.
#[derive(Debug, Clone, Default)]
pub struct ColorHistogram {
    index: HashMap<[u8; 3], usize>,
    buckets: Vec<Bucket>,
    total_sampled: u32,
}

impl ColorHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one sample in the bucket for `key`
    pub fn record(&mut self, key: [u8; 3]) {
        self.total_sampled = self.total_sampled.saturating_add(1);
        match self.index.get(&key) {
            Some(&slot) => {
                let bucket = &mut self.buckets[slot];
                bucket.count = bucket.count.saturating_add(1);
            }
            None => {
                self.index.insert(key, self.buckets.len());
                self.buckets.push(Bucket { rgb: key, count: 1 });
            }
        }
    }

    /// Number of samples recorded across all buckets
    pub fn total_sampled(&self) -> u32 {
        self.total_sampled
    }

    /// Buckets in first-seen order
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Sample count of one quantized color
    pub fn count(&self, key: [u8; 3]) -> Option<u32> {
        self.index.get(&key).map(|&slot| self.buckets[slot].count)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Rounds channels onto a coarse grid
#[derive(Debug, Clone, Copy)]
pub struct ColorQuantizer {
    factor: u32,
}

impl ColorQuantizer {
    /// Create a quantizer with the given grid step
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidParameter`] if `factor` is zero.
    pub fn new(factor: u32) -> Result<Self> {
        if factor == 0 {
            return Err(PaletteError::invalid_parameter("QUANTIZATION_FACTOR", factor));
        }
        Ok(Self { factor })
    }

    pub fn factor(&self) -> u32 {
        self.factor
    }

    /// Round one channel to the nearest multiple of the factor (halves round up)
    ///
    /// Results above 255 (possible for factors that do not divide the range
    /// evenly) are clamped to 255.
    pub fn quantize_channel(&self, channel: u8) -> u8 {
        let factor = u64::from(self.factor);
        let steps = (u64::from(channel) * 2 + factor) / (2 * factor);
        (steps * factor).min(255) as u8
    }

    /// Quantize all three channels
    pub fn quantize(&self, rgb: [u8; 3]) -> [u8; 3] {
        rgb.map(|c| self.quantize_channel(c))
    }

    /// Quantize every sample into a fresh histogram
    pub fn histogram<I>(&self, samples: I) -> ColorHistogram
    where
        I: IntoIterator<Item = [u8; 3]>,
    {
        let mut histogram = ColorHistogram::new();
        for rgb in samples {
            histogram.record(self.quantize(rgb));
        }
        histogram
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_factor_rejected() {
        assert!(matches!(
            ColorQuantizer::new(0),
            Err(PaletteError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_quantize_channel_default_factor() {
        let q = ColorQuantizer::new(25).unwrap();
        assert_eq!(q.quantize_channel(255), 250);
        assert_eq!(q.quantize_channel(0), 0);
        assert_eq!(q.quantize_channel(12), 0);
        assert_eq!(q.quantize_channel(13), 25); // 0.52 rounds up
        assert_eq!(q.quantize_channel(37), 25);
        assert_eq!(q.quantize_channel(38), 50);
    }

    #[test]
    fn test_quantize_channel_half_rounds_up() {
        let q = ColorQuantizer::new(10).unwrap();
        assert_eq!(q.quantize_channel(5), 10);
        assert_eq!(q.quantize_channel(15), 20);
        assert_eq!(q.quantize_channel(14), 10);
    }

    #[test]
    fn test_quantize_channel_clamps_overshoot() {
        let q = ColorQuantizer::new(100).unwrap();
        assert_eq!(q.quantize_channel(255), 255); // round(2.55) * 100 = 300
        assert_eq!(q.quantize_channel(149), 100);
    }

    #[test]
    fn test_factor_one_is_identity() {
        let q = ColorQuantizer::new(1).unwrap();
        for c in 0..=255u8 {
            assert_eq!(q.quantize_channel(c), c);
        }
    }

    #[test]
    fn test_huge_factor_does_not_overflow() {
        let q = ColorQuantizer::new(u32::MAX).unwrap();
        assert_eq!(q.quantize_channel(255), 0);
    }

    #[test]
    fn test_histogram_counts_and_order() {
        let q = ColorQuantizer::new(25).unwrap();
        let samples = vec![[0, 0, 255], [255, 0, 0], [2, 3, 251], [254, 1, 1]];
        let histogram = q.histogram(samples);

        assert_eq!(histogram.total_sampled(), 4);
        assert_eq!(histogram.len(), 2);
        assert_eq!(histogram.buckets()[0].rgb, [0, 0, 250]);
        assert_eq!(histogram.buckets()[1].rgb, [250, 0, 0]);
        assert_eq!(histogram.count([250, 0, 0]), Some(2));
        assert_eq!(histogram.count([1, 1, 1]), None);
    }

    #[test]
    fn test_empty_histogram() {
        let histogram = ColorQuantizer::new(25).unwrap().histogram(std::iter::empty());
        assert!(histogram.is_empty());
        assert_eq!(histogram.total_sampled(), 0);
    }
}
