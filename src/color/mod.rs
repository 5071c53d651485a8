//! Color conversion and palette analysis module
//!
//! This module handles hex/RGB/HSL conversions and the end-to-end
//! extraction of a palette from a pixel buffer.

pub mod conversion;
pub mod analysis;

pub use analysis::{PaletteExtractor, Progress};
pub use conversion::{hex_to_rgb, parse_color, rgb_to_hex, rgb_to_hsl, HslColor};
