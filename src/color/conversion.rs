//! Color space conversion utilities
//!
//! Provides the conversions the extraction and contrast stages share:
//! - RGB to lowercase `#rrggbb` hex and back
//! - RGB to integer HSL (degrees / percent)
//! - Lenient parsing of hex and CSS `rgb()` / `rgba()` strings

use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};

use crate::constants::{theme, wcag};
use crate::{PaletteError, Result};

/// HSL color rounded to integer degrees and percentages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HslColor {
    /// Hue in degrees, 0-360
    pub h: u16,
    /// Saturation in percent, 0-100
    pub s: u8,
    /// Lightness in percent, 0-100
    pub l: u8,
}

/// Convert RGB (0-255) to a lowercase hex string
///
/// # Arguments
///
/// * `rgb` - Red, green and blue channels
///
/// # Returns
///
/// Hex color string (e.g., "#fa0000")
pub fn rgb_to_hex(rgb: [u8; 3]) -> String {
    let [r, g, b] = rgb;
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Parse a hexadecimal color string to RGB
///
/// # Arguments
///
/// * `hex` - Hex color string, with or without the leading `#` (e.g., "#FF0000" or "ff0000")
///
/// # Errors
///
/// Returns [`PaletteError::MalformedColor`] unless the input is exactly six
/// hex digits after the optional `#`.
pub fn hex_to_rgb(hex: &str) -> Result<[u8; 3]> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(PaletteError::malformed_color(
            hex,
            format!("expected 6 hex digits, got {:?}", digits),
        ));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|e| PaletteError::malformed_color(hex, e.to_string()))
    };
    Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

/// Hue in degrees from the dominant-channel sector
///
/// Evaluated as `((x - y) / d + k) / 6 * 360`. Half-degree hues that land
/// just below .5 in floating point round down (rgb(0, 13, 40) is 220).
fn hue_degrees(rgb: [u8; 3]) -> f64 {
    let [r, g, b] = rgb.map(|c| f64::from(c) / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == min {
        return 0.0;
    }
    let d = max - min;
    let sector = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    sector / 6.0 * 360.0
}

/// Convert RGB (0-255) to integer HSL
///
/// Achromatic colors (all channels equal) get hue and saturation 0. Hue is
/// rounded to whole degrees, saturation and lightness to whole percent.
pub fn rgb_to_hsl(rgb: [u8; 3]) -> HslColor {
    let [r, g, b] = rgb;
    let srgb: Srgb<f64> = Srgb::new(r, g, b).into_format();
    let hsl: Hsl<palette::encoding::Srgb, f64> = srgb.into_color();

    HslColor {
        h: hue_degrees(rgb).round() as u16,
        s: (hsl.saturation * 100.0).round() as u8,
        l: (hsl.lightness * 100.0).round() as u8,
    }
}

/// Parse a color given as hex or CSS functional notation
///
/// Accepts `#rrggbb`, `rrggbb`, `rgb(r, g, b)` and `rgba(r, g, b, a)`.
/// An `rgba` color that is almost fully transparent resolves to white.
///
/// # Errors
///
/// Returns [`PaletteError::MalformedColor`] for any other input.
pub fn parse_color(input: &str) -> Result<[u8; 3]> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(PaletteError::malformed_color(input, "empty color"));
    }

    let Some(args) = trimmed
        .strip_prefix("rgba(")
        .or_else(|| trimmed.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    else {
        return hex_to_rgb(trimmed);
    };

    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(PaletteError::malformed_color(
            input,
            format!("expected 3 or 4 components, got {}", parts.len()),
        ));
    }

    let mut rgb = [0u8; 3];
    for (slot, part) in rgb.iter_mut().zip(&parts) {
        *slot = part
            .parse::<u8>()
            .map_err(|e| PaletteError::malformed_color(input, format!("{:?}: {}", part, e)))?;
    }

    if let Some(alpha) = parts.get(3) {
        let alpha: f64 = alpha
            .parse()
            .map_err(|_| PaletteError::malformed_color(input, format!("invalid alpha {:?}", alpha)))?;
        if alpha < wcag::TRANSPARENT_ALPHA {
            return hex_to_rgb(theme::WHITE);
        }
    }

    Ok(rgb)
}

/// Normalize any parsable color to lowercase `#rrggbb`
pub fn normalize_hex(input: &str) -> Result<String> {
    parse_color(input).map(rgb_to_hex)
}
