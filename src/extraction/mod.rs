//! Palette extraction stages
//!
//! Sampling, quantization, candidate ranking and diversity selection, in
//! pipeline order. [`crate::color::PaletteExtractor`] chains them.

pub mod sampler;
pub mod quantizer;
pub mod candidates;
pub mod diversity;

pub use candidates::CandidateBuilder;
pub use diversity::{color_difference, DiversitySelector};
pub use quantizer::{ColorHistogram, ColorQuantizer};
pub use sampler::PixelSampler;
