//! # Chroma Palette
//!
//! A Rust crate for extracting accessible color palettes and themes from
//! decoded images.
//!
//! This library provides:
//! - Palette extraction by strided sampling, grid quantization and greedy
//!   diversity selection
//! - WCAG 2.1 relative luminance, contrast ratios and AA/AAA compliance
//! - Theme composition that maps palette colors onto named UI roles and
//!   repairs illegible text/border pairings
//! - An asynchronous worker transport for running analyses off the caller's task
//!
//! ## Example
//!
//! ```rust
//! use chroma_palette::{analyze_pixels, ExtractionConfig, PixelBuffer, ThemeComposer};
//!
//! let red = [255u8, 0, 0, 255].repeat(100);
//! let buffer = PixelBuffer::new(10, 10, red)?;
//! let palette = analyze_pixels(&buffer, &ExtractionConfig::default())?;
//! assert_eq!(palette.colors()[0].hex, "#fa0000");
//!
//! let theme = ThemeComposer::new().compose_palette(&palette);
//! println!("primary: {}", theme.primary);
//! # Ok::<(), chroma_palette::PaletteError>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod error;
pub mod constants;
pub mod config;
pub mod color;
pub mod extraction;
pub mod accessibility;
pub mod theme;
pub mod worker;

pub use accessibility::contrast::{
    best_text_color, check_compliance, contrast_ratio, relative_luminance, ContrastResult, Grade,
    TextSize, WcagLevel,
};
pub use color::conversion::HslColor;
pub use color::PaletteExtractor;
pub use config::{ConfigOverrides, ExtractionConfig};
pub use error::{PaletteError, Result};
pub use theme::{Theme, ThemeComposer, ThemeRole};
pub use worker::{PaletteWorker, WorkerRequest, WorkerResponse};

/// One representative color of an analyzed image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSample {
    /// Quantized sRGB channels
    pub rgb: [u8; 3],
    /// Lowercase `#rrggbb` form of `rgb`
    pub hex: String,
    /// Integer HSL form of `rgb`
    pub hsl: HslColor,
    /// Number of sampled pixels in this bucket
    pub count: u32,
    /// Share of all sampled pixels, 0-100
    pub percentage: f64,
}

/// Extracted colors, most frequent first
///
/// Hex values are unique. Built fresh per analysis and not mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<ColorSample>,
}

impl Palette {
    /// An empty palette (e.g. from a fully transparent image)
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn colors(&self) -> &[ColorSample] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColorSample> {
        self.colors.iter()
    }

    /// Hex strings in palette order
    pub fn hexes(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.hex.clone()).collect()
    }

    pub fn into_colors(self) -> Vec<ColorSample> {
        self.colors
    }
}

/// Wraps the colors as given; ordering, uniqueness and `hex`/`rgb` agreement
/// are not checked.
impl From<Vec<ColorSample>> for Palette {
    fn from(colors: Vec<ColorSample>) -> Self {
        Self { colors }
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a ColorSample;
    type IntoIter = std::slice::Iter<'a, ColorSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}

/// Row-major RGBA8 pixel data of one decoded image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA8 bytes
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidParameter`] if `data.len()` is not
    /// `width * height * 4`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let buffer = Self { width, height, data };
        buffer.validate()?;
        Ok(buffer)
    }

    /// Copy the pixels of a decoded `image` crate buffer
    pub fn from_rgba_image(image: &image::RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            data: image.as_raw().clone(),
        }
    }

    /// Check that the byte length matches the dimensions
    pub fn validate(&self) -> Result<()> {
        let expected = u64::from(self.width)
            * u64::from(self.height)
            * constants::sampling::BYTES_PER_PIXEL as u64;
        if self.data.len() as u64 != expected {
            return Err(PaletteError::invalid_parameter(
                "pixelData",
                format!(
                    "{} bytes for {}x{} (expected {})",
                    self.data.len(),
                    self.width,
                    self.height,
                    expected
                ),
            ));
        }
        Ok(())
    }

    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// Extract a palette from a pixel buffer
///
/// This is the main entry point for palette extraction. The configuration is
/// validated before any sampling begins.
///
/// # Arguments
///
/// * `buffer` - Decoded RGBA8 image
/// * `config` - Extraction parameters
///
/// # Returns
///
/// A [`Palette`] of at most `config.max_colors` colors, most frequent first.
/// Images without opaque pixels yield an empty palette.
///
/// # Errors
///
/// Returns [`PaletteError::InvalidParameter`] if:
/// - The configuration violates a precondition (zero factor, stride or color count)
/// - The buffer length does not match its dimensions
pub fn analyze_pixels(buffer: &PixelBuffer, config: &ExtractionConfig) -> Result<Palette> {
    buffer.validate()?;
    let extractor = PaletteExtractor::new(config)?;
    Ok(extractor.extract(buffer.as_bytes()))
}
