//! WCAG 2.1 luminance and contrast scoring
//!
//! Colors are accepted as strings (hex or CSS `rgb()`/`rgba()`). Malformed
//! input never fails: luminance falls back to 0.5 and contrast to 1.0, with a
//! logged warning.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::color::conversion::parse_color;
use crate::constants::{theme, wcag};

/// Conformance level being tested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WcagLevel {
    #[default]
    AA,
    AAA,
}

/// Text size class; large is 18pt, or 14pt bold, and up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    #[default]
    Normal,
    Large,
}

/// Best standard a color pair reaches, independent of the level asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    AAA,
    AA,
    Fail,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Grade::AAA => "AAA",
            Grade::AA => "AA",
            Grade::Fail => "Fail",
        })
    }
}

/// Finer-grained label that also recognizes large-text AA
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceLevel {
    AAA,
    AA,
    #[serde(rename = "AA Large")]
    AALarge,
    Fail,
}

/// Outcome of one compliance check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastResult {
    /// Contrast ratio rounded to two decimals
    pub ratio: f64,
    pub passes: bool,
    pub required_ratio: f64,
    pub level: WcagLevel,
    pub size: TextSize,
    pub grade: Grade,
}

fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= wcag::LINEAR_THRESHOLD {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance of an RGB triple, in [0, 1]
pub fn relative_luminance_rgb(rgb: [u8; 3]) -> f64 {
    let [r, g, b] = rgb;
    wcag::RED_COEFFICIENT * linearize(r)
        + wcag::GREEN_COEFFICIENT * linearize(g)
        + wcag::BLUE_COEFFICIENT * linearize(b)
}

/// Relative luminance of a color string
///
/// Returns 0.5 (and logs a warning) when the color cannot be parsed.
pub fn relative_luminance(color: &str) -> f64 {
    match parse_color(color) {
        Ok(rgb) => relative_luminance_rgb(rgb),
        Err(err) => {
            warn!(color, error = %err, "unparsable color, using neutral luminance");
            wcag::FALLBACK_LUMINANCE
        }
    }
}

/// Contrast ratio between two RGB triples, in [1, 21]
pub fn contrast_ratio_rgb(a: [u8; 3], b: [u8; 3]) -> f64 {
    let l1 = relative_luminance_rgb(a);
    let l2 = relative_luminance_rgb(b);
    (l1.max(l2) + wcag::FLARE) / (l1.min(l2) + wcag::FLARE)
}

/// Contrast ratio between two color strings
///
/// Symmetric in its arguments. Returns 1.0 (and logs a warning) when either
/// color cannot be parsed, so a malformed pair never reports as legible.
pub fn contrast_ratio(a: &str, b: &str) -> f64 {
    match (parse_color(a), parse_color(b)) {
        (Ok(a), Ok(b)) => contrast_ratio_rgb(a, b),
        (Err(err), _) | (_, Err(err)) => {
            warn!(error = %err, "unparsable color in contrast pair, using neutral ratio");
            wcag::FALLBACK_RATIO
        }
    }
}

/// Minimum ratio for a level and text size
pub fn required_ratio(level: WcagLevel, size: TextSize) -> f64 {
    match (level, size) {
        (WcagLevel::AA, TextSize::Normal) => wcag::AA_NORMAL,
        (WcagLevel::AA, TextSize::Large) => wcag::AA_LARGE,
        (WcagLevel::AAA, TextSize::Normal) => wcag::AAA_NORMAL,
        (WcagLevel::AAA, TextSize::Large) => wcag::AAA_LARGE,
    }
}

/// Grade of a ratio: AAA from 7.0, AA from 4.5
pub fn grade(ratio: f64) -> Grade {
    if ratio >= wcag::AAA_NORMAL {
        Grade::AAA
    } else if ratio >= wcag::AA_NORMAL {
        Grade::AA
    } else {
        Grade::Fail
    }
}

/// Compliance label of a ratio, including large-text AA from 3.0
pub fn compliance_level(ratio: f64) -> ComplianceLevel {
    if ratio >= wcag::AAA_NORMAL {
        ComplianceLevel::AAA
    } else if ratio >= wcag::AA_NORMAL {
        ComplianceLevel::AA
    } else if ratio >= wcag::AA_LARGE {
        ComplianceLevel::AALarge
    } else {
        ComplianceLevel::Fail
    }
}

/// Classify an already computed ratio
///
/// `passes` and `grade` use the exact ratio; the reported ratio is rounded
/// to two decimals.
pub fn classify(ratio: f64, level: WcagLevel, size: TextSize) -> ContrastResult {
    let required_ratio = required_ratio(level, size);
    ContrastResult {
        ratio: (ratio * 100.0).round() / 100.0,
        passes: ratio >= required_ratio,
        required_ratio,
        level,
        size,
        grade: grade(ratio),
    }
}

/// Check a foreground/background pair against a level and text size
pub fn check_compliance(
    foreground: &str,
    background: &str,
    level: WcagLevel,
    size: TextSize,
) -> ContrastResult {
    classify(contrast_ratio(foreground, background), level, size)
}

/// Pick the candidate with the highest contrast against `background`
///
/// Ties keep the earlier candidate. Returns `None` only for an empty list.
pub fn best_text_color<'a>(background: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let mut best: Option<(&'a str, f64)> = None;
    for &candidate in candidates {
        let ratio = contrast_ratio(background, candidate);
        if best.map_or(true, |(_, top)| ratio > top) {
            best = Some((candidate, ratio));
        }
    }
    best.map(|(color, _)| color)
}

/// Quick text color heuristic: dark text on light backgrounds, white otherwise
pub fn optimal_text_color(background: &str) -> &'static str {
    if relative_luminance(background) > 0.5 {
        theme::DARK_TEXT
    } else {
        theme::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_extremes() {
        assert!(relative_luminance("#000000").abs() < 1e-12);
        assert!((relative_luminance("#ffffff") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_luminance_linear_segment() {
        // 10/255 = 0.0392 sits just below the threshold
        let expected = 0.2126 * (10.0 / 255.0) / 12.92;
        assert!((relative_luminance_rgb([10, 0, 0]) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_luminance_malformed_is_neutral() {
        assert_eq!(relative_luminance("not-a-color"), 0.5);
        assert_eq!(relative_luminance("#12345"), 0.5);
        assert_eq!(relative_luminance(""), 0.5);
    }

    #[test]
    fn test_black_white_ratio() {
        assert!((contrast_ratio("#ffffff", "#000000") - 21.0).abs() < 1e-9);
        assert!((contrast_ratio("#000000", "#ffffff") - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_identity_ratio() {
        assert_eq!(contrast_ratio("#3366cc", "#3366cc"), 1.0);
    }

    #[test]
    fn test_malformed_ratio_is_neutral() {
        assert_eq!(contrast_ratio("#ffffff", "oops"), 1.0);
        assert_eq!(contrast_ratio("", "#000000"), 1.0);
    }

    #[test]
    fn test_css_notation_matches_hex() {
        let css = contrast_ratio("rgb(255, 255, 255)", "rgb(118, 75, 162)");
        let hex = contrast_ratio("#ffffff", "#764ba2");
        assert_eq!(css, hex);
    }

    #[test]
    fn test_required_ratio_table() {
        assert_eq!(required_ratio(WcagLevel::AA, TextSize::Normal), 4.5);
        assert_eq!(required_ratio(WcagLevel::AA, TextSize::Large), 3.0);
        assert_eq!(required_ratio(WcagLevel::AAA, TextSize::Normal), 7.0);
        assert_eq!(required_ratio(WcagLevel::AAA, TextSize::Large), 4.5);
    }

    #[test]
    fn test_check_compliance_white_on_black() {
        let result = check_compliance("#ffffff", "#000000", WcagLevel::AA, TextSize::Normal);
        assert_eq!(result.ratio, 21.0);
        assert!(result.passes);
        assert_eq!(result.grade, Grade::AAA);
        assert_eq!(result.required_ratio, 4.5);
    }

    #[test]
    fn test_grade_independent_of_level() {
        // #767676 on white is about 4.54
        let aa = check_compliance("#767676", "#ffffff", WcagLevel::AA, TextSize::Normal);
        let aaa = check_compliance("#767676", "#ffffff", WcagLevel::AAA, TextSize::Normal);
        assert!(aa.passes);
        assert!(!aaa.passes);
        assert_eq!(aa.grade, Grade::AA);
        assert_eq!(aaa.grade, Grade::AA);
    }

    #[test]
    fn test_passes_uses_unrounded_ratio() {
        let result = classify(4.496, WcagLevel::AA, TextSize::Normal);
        assert_eq!(result.ratio, 4.5);
        assert!(!result.passes);
        assert_eq!(result.grade, Grade::Fail);
    }

    #[test]
    fn test_compliance_level_labels() {
        assert_eq!(compliance_level(7.0), ComplianceLevel::AAA);
        assert_eq!(compliance_level(4.5), ComplianceLevel::AA);
        assert_eq!(compliance_level(3.0), ComplianceLevel::AALarge);
        assert_eq!(compliance_level(2.99), ComplianceLevel::Fail);
    }

    #[test]
    fn test_best_text_color() {
        assert_eq!(best_text_color("#ffffff", &["#000000", "#ffffff"]), Some("#000000"));
        assert_eq!(best_text_color("#000000", &["#000000", "#ffffff"]), Some("#ffffff"));
        assert_eq!(best_text_color("#000000", &[]), None);
    }

    #[test]
    fn test_best_text_color_tie_keeps_first() {
        assert_eq!(best_text_color("#808080", &["#123456", "#123456"]), Some("#123456"));
        assert_eq!(best_text_color("#808080", &["bad", "also-bad"]), Some("bad"));
    }

    #[test]
    fn test_optimal_text_color() {
        assert_eq!(optimal_text_color("#ffffff"), "#1a202c");
        assert_eq!(optimal_text_color("#000080"), "#ffffff");
    }

    #[test]
    fn test_grade_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Grade::Fail).unwrap(), "\"Fail\"");
        assert_eq!(
            serde_json::to_string(&ComplianceLevel::AALarge).unwrap(),
            "\"AA Large\""
        );
    }
}
