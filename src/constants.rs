//! Extraction defaults, WCAG thresholds and theme reference values
//!
//! This module contains compile-time constants for palette extraction,
//! contrast scoring and theme composition.

/// Pixel sampling and histogram defaults
pub mod sampling {
    /// Maximum number of colors in an extracted palette
    pub const MAX_COLORS: u32 = 8;

    /// Candidates at or below this share of sampled pixels (percent) are dropped
    pub const MIN_PERCENTAGE: f64 = 1.0;

    /// Byte stride between samples (40 bytes = every 10th RGBA pixel)
    pub const SAMPLE_RATE: u32 = 40;

    /// Grid step used to bucket each channel
    pub const QUANTIZATION_FACTOR: u32 = 25;

    /// Pixels with alpha below this value are treated as transparent
    pub const ALPHA_CUTOFF: u8 = 128;

    /// Bytes per RGBA pixel
    pub const BYTES_PER_PIXEL: usize = 4;
}

/// Greedy diversity selection weights
pub mod diversity {
    /// Weight of the Euclidean RGB distance in the color difference metric
    pub const RGB_WEIGHT: f64 = 0.7;
    /// Weight of the absolute hue difference (degrees)
    pub const HUE_WEIGHT: f64 = 0.2;
    /// Weight of the absolute saturation difference (percent)
    pub const SATURATION_WEIGHT: f64 = 0.05;
    /// Weight of the absolute lightness difference (percent)
    pub const LIGHTNESS_WEIGHT: f64 = 0.05;

    /// Score weight of the normalized minimum difference to the selection
    pub const DIFFERENCE_SCORE_WEIGHT: f64 = 0.6;
    /// Score weight of the candidate's saturation
    pub const SATURATION_SCORE_WEIGHT: f64 = 0.3;
    /// Score weight of the candidate's frequency
    pub const FREQUENCY_SCORE_WEIGHT: f64 = 0.1;

    /// Divisor normalizing the minimum difference
    pub const DIFFERENCE_NORMALIZER: f64 = 255.0;
}

/// WCAG 2.1 contrast parameters
pub mod wcag {
    /// Channel value at or below which the linear segment of the sRGB curve applies
    pub const LINEAR_THRESHOLD: f64 = 0.03928;

    /// Luminance coefficients for linearized R, G, B
    pub const RED_COEFFICIENT: f64 = 0.2126;
    pub const GREEN_COEFFICIENT: f64 = 0.7152;
    pub const BLUE_COEFFICIENT: f64 = 0.0722;

    /// Flare term added to both luminances in the contrast ratio
    pub const FLARE: f64 = 0.05;

    /// Required ratios per level and text size
    pub const AA_NORMAL: f64 = 4.5;
    pub const AA_LARGE: f64 = 3.0;
    pub const AAA_NORMAL: f64 = 7.0;
    pub const AAA_LARGE: f64 = 4.5;

    /// Luminance reported for colors that cannot be parsed
    pub const FALLBACK_LUMINANCE: f64 = 0.5;

    /// Contrast ratio reported when either color cannot be parsed
    pub const FALLBACK_RATIO: f64 = 1.0;

    /// `rgba()` colors with alpha below this are treated as white
    pub const TRANSPARENT_ALPHA: f64 = 0.1;
}

/// Theme composition thresholds and built-in colors
pub mod theme {
    /// Saturation (max - min channel) above which a color is vivid
    pub const VIVID_SATURATION: f64 = 80.0;
    /// Brightness above which a color is light
    pub const LIGHT_BRIGHTNESS: f64 = 180.0;
    /// Brightness at or below which a color is dark
    pub const DARK_BRIGHTNESS: f64 = 100.0;
    /// Warmth above which a color is warm; below the negation it is cool
    pub const WARMTH_THRESHOLD: f64 = 0.1;

    /// Minimum contrast for body text against the background
    pub const TEXT_MIN_CONTRAST: f64 = 4.5;
    /// Minimum contrast for borders and secondary text
    pub const BORDER_MIN_CONTRAST: f64 = 3.0;

    pub const BLACK: &str = "#000000";
    pub const WHITE: &str = "#ffffff";
    pub const BORDER_GRAY: &str = "#cccccc";
    pub const BORDER_HOVER_GRAY: &str = "#999999";
    pub const MUTED_GRAY: &str = "#666666";

    /// Dark text color used on light backgrounds by the quick heuristic
    pub const DARK_TEXT: &str = "#1a202c";

    /// Gradient angle in degrees
    pub const GRADIENT_ANGLE: u16 = 135;
    /// Alpha suffix appended to overlay colors (0x20 of 0xff)
    pub const OVERLAY_ALPHA: &str = "20";

    /// Built-in default theme colors
    pub mod defaults {
        pub const PRIMARY: &str = "#667eea";
        pub const SECONDARY: &str = "#764ba2";
        pub const BACKGROUND: &str = "#ffffff";
        pub const TEXT_ON_BACKGROUND: &str = "#2d3748";
        pub const SURFACE: &str = "#f7fafc";
        pub const BORDER: &str = "#e2e8f0";
        pub const BORDER_HOVER: &str = "#cbd5e0";
        pub const MUTED_TEXT: &str = "#a0aec0";
        pub const SHADOW: &str = "#718096";
        pub const DARK_ACCENT: &str = "#4a5568";
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stride_is_pixel_aligned() {
        assert_eq!(sampling::SAMPLE_RATE as usize % sampling::BYTES_PER_PIXEL, 0);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let metric = diversity::RGB_WEIGHT
            + diversity::HUE_WEIGHT
            + diversity::SATURATION_WEIGHT
            + diversity::LIGHTNESS_WEIGHT;
        assert!((metric - 1.0).abs() < 1e-12);

        let score = diversity::DIFFERENCE_SCORE_WEIGHT
            + diversity::SATURATION_SCORE_WEIGHT
            + diversity::FREQUENCY_SCORE_WEIGHT;
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_wcag_threshold_ordering() {
        assert!(wcag::AA_LARGE < wcag::AA_NORMAL);
        assert!(wcag::AAA_LARGE < wcag::AAA_NORMAL);
        assert!(wcag::AA_NORMAL <= wcag::AAA_LARGE);
        assert!(theme::BORDER_MIN_CONTRAST < theme::TEXT_MIN_CONTRAST);
    }
}
