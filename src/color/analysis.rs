//! Palette extraction from RGBA pixel data
//!
//! Chains the extraction stages:
//! - Strided sampling with transparency rejection
//! - Grid quantization into a frequency histogram
//! - Candidate ranking with a minimum-share filter
//! - Greedy diversity selection
//!
//! Progress is reported at coarse milestones through an optional callback.

use tracing::debug;

use crate::config::ExtractionConfig;
use crate::extraction::{CandidateBuilder, ColorQuantizer, DiversitySelector, PixelSampler};
use crate::{Palette, Result};

/// Advisory progress notification
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// Completion estimate, 0-100
    pub percent: u8,
    /// Human-readable stage description
    pub message: String,
}

impl Progress {
    fn new(percent: u8, message: impl Into<String>) -> Self {
        Self {
            percent,
            message: message.into(),
        }
    }
}

/// Palette extractor with a validated configuration
#[derive(Debug, Clone)]
pub struct PaletteExtractor {
    sampler: PixelSampler,
    quantizer: ColorQuantizer,
    candidates: CandidateBuilder,
    selector: DiversitySelector,
}

impl PaletteExtractor {
    /// Create an extractor from a configuration
    ///
    /// # Errors
    ///
    /// Returns [`crate::PaletteError::InvalidParameter`] if the configuration
    /// fails [`ExtractionConfig::validate`].
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            sampler: PixelSampler::new(config.sample_rate as usize),
            quantizer: ColorQuantizer::new(config.quantization_factor)?,
            candidates: CandidateBuilder::new(config.min_percentage),
            selector: DiversitySelector::new(config.max_colors as usize)?,
        })
    }

    /// Extract a palette from raw RGBA8 bytes
    pub fn extract(&self, data: &[u8]) -> Palette {
        self.extract_with_progress(data, |_| {})
    }

    /// Extract a palette, reporting progress at 0, 50, 75 and 100 percent
    ///
    /// A buffer with no opaque samples yields an empty palette.
    pub fn extract_with_progress<F>(&self, data: &[u8], mut on_progress: F) -> Palette
    where
        F: FnMut(Progress),
    {
        on_progress(Progress::new(0, "Starting color analysis"));

        let histogram = self.quantizer.histogram(self.sampler.samples(data));
        debug!(
            bytes = data.len(),
            stride = self.sampler.stride(),
            sampled = histogram.total_sampled(),
            buckets = histogram.len(),
            "sampled pixel buffer"
        );
        on_progress(Progress::new(
            50,
            format!("Processing {} sampled pixels", histogram.total_sampled()),
        ));

        let candidates = self.candidates.build(&histogram);
        debug!(candidates = candidates.len(), "ranked candidates");
        on_progress(Progress::new(
            75,
            format!("Found {} distinct colors", candidates.len()),
        ));

        let palette = Palette::from(self.selector.select(candidates));
        debug!(colors = palette.len(), "selected palette");
        on_progress(Progress::new(100, "Analysis complete"));

        palette
    }
}
