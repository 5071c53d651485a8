//! Histogram to ranked candidate list

use crate::color::conversion::{rgb_to_hex, rgb_to_hsl};
use crate::constants::sampling::MIN_PERCENTAGE;
use crate::extraction::quantizer::ColorHistogram;
use crate::ColorSample;

/// Converts histogram buckets into frequency-ranked [`ColorSample`]s
#[derive(Debug, Clone, Copy)]
pub struct CandidateBuilder {
    min_percentage: f64,
}

impl Default for CandidateBuilder {
    fn default() -> Self {
        Self::new(MIN_PERCENTAGE)
    }
}

impl CandidateBuilder {
    pub fn new(min_percentage: f64) -> Self {
        Self { min_percentage }
    }

    /// Build the candidate list for one histogram
    ///
    /// Buckets covering `min_percentage` or less of the sampled pixels are
    /// dropped. The rest are sorted by percentage, descending; equal
    /// percentages keep first-seen order.
    pub fn build(&self, histogram: &ColorHistogram) -> Vec<ColorSample> {
        let total = histogram.total_sampled();
        if total == 0 {
            return Vec::new();
        }

        let mut candidates: Vec<ColorSample> = histogram
            .buckets()
            .iter()
            .map(|bucket| ColorSample {
                rgb: bucket.rgb,
                hex: rgb_to_hex(bucket.rgb),
                hsl: rgb_to_hsl(bucket.rgb),
                count: bucket.count,
                percentage: f64::from(bucket.count) / f64::from(total) * 100.0,
            })
            .filter(|sample| sample.percentage > self.min_percentage)
            .collect();

        candidates.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::quantizer::ColorQuantizer;

    fn histogram(samples: &[([u8; 3], usize)]) -> ColorHistogram {
        let quantizer = ColorQuantizer::new(1).unwrap();
        quantizer.histogram(
            samples
                .iter()
                .flat_map(|(rgb, n)| std::iter::repeat(*rgb).take(*n)),
        )
    }

    #[test]
    fn test_empty_histogram_gives_no_candidates() {
        let candidates = CandidateBuilder::default().build(&ColorHistogram::new());
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_percentages_and_sorting() {
        let h = histogram(&[([0, 0, 255], 25), ([255, 0, 0], 75)]);
        let candidates = CandidateBuilder::default().build(&h);

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].hex, "#ff0000");
        assert_eq!(candidates[0].count, 75);
        assert!((candidates[0].percentage - 75.0).abs() < 1e-9);
        assert!((candidates[1].percentage - 25.0).abs() < 1e-9);
        assert_eq!(candidates[1].hsl.h, 240);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // 1 of 100 samples is exactly 1.0% and must be dropped
        let h = histogram(&[([10, 10, 10], 99), ([200, 0, 0], 1)]);
        let candidates = CandidateBuilder::new(1.0).build(&h);
        assert_eq!(candidates.len(), 1);
        assert!(candidates.iter().all(|c| c.percentage > 1.0));
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let h = histogram(&[([0, 255, 0], 10), ([0, 0, 255], 10), ([255, 0, 0], 10)]);
        let hexes: Vec<_> = CandidateBuilder::new(0.0)
            .build(&h)
            .into_iter()
            .map(|c| c.hex)
            .collect();
        assert_eq!(hexes, vec!["#00ff00", "#0000ff", "#ff0000"]);
    }
}
