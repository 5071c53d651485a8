//! Palette-wide contrast audit
//!
//! Treats every palette color as a background and measures plain white and
//! black text on it.

use serde::{Deserialize, Serialize};

use super::contrast::{
    classify, compliance_level, contrast_ratio_rgb, ComplianceLevel, TextSize, WcagLevel,
};
use crate::constants::theme;
use crate::color::conversion::hex_to_rgb;
use crate::{ColorSample, Palette};

/// White/black text measurements for one palette color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorContrastReport {
    pub background: String,
    pub color_index: usize,
    pub white_ratio: f64,
    pub black_ratio: f64,
    /// White text reaches AA for normal text
    pub white_passes: bool,
    /// Black text reaches AA for normal text
    pub black_passes: bool,
    pub percentage: f64,
}

impl ColorContrastReport {
    /// Either text color is legible on this background
    pub fn passes(&self) -> bool {
        self.white_passes || self.black_passes
    }

    pub fn recommend(&self) -> Recommendation {
        recommend(self)
    }
}

/// Aggregate over an audit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastStats {
    pub total: usize,
    pub passing: usize,
    pub failing: usize,
    /// Whole percent of passing colors
    pub pass_rate: u32,
}

/// Which plain text color to use on a background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextChoice {
    White,
    Black,
}

impl TextChoice {
    pub fn hex(self) -> &'static str {
        match self {
            TextChoice::White => theme::WHITE,
            TextChoice::Black => theme::BLACK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextOption {
    pub suitable: bool,
    pub ratio: f64,
    pub level: ComplianceLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub white_text: TextOption,
    pub black_text: TextOption,
    pub best_choice: TextChoice,
}

fn audit_color(index: usize, color: &ColorSample, rgb: [u8; 3]) -> ColorContrastReport {
    let white_ratio = contrast_ratio_rgb([255, 255, 255], rgb);
    let black_ratio = contrast_ratio_rgb([0, 0, 0], rgb);
    ColorContrastReport {
        background: color.hex.clone(),
        color_index: index,
        white_ratio,
        black_ratio,
        white_passes: classify(white_ratio, WcagLevel::AA, TextSize::Normal).passes,
        black_passes: classify(black_ratio, WcagLevel::AA, TextSize::Normal).passes,
        percentage: color.percentage,
    }
}

/// Audit every palette color as a background
///
/// Ratios are measured on the color named by `hex`, not on the `rgb` field.
/// Entries whose hex does not parse are skipped; `color_index` keeps the
/// original palette position.
pub fn audit_palette(palette: &Palette) -> Vec<ColorContrastReport> {
    palette
        .iter()
        .enumerate()
        .filter_map(|(index, color)| {
            let rgb = hex_to_rgb(&color.hex).ok()?;
            Some(audit_color(index, color, rgb))
        })
        .collect()
}

/// Summarize an audit; an empty audit reports all zeros
pub fn contrast_stats(reports: &[ColorContrastReport]) -> ContrastStats {
    let total = reports.len();
    if total == 0 {
        return ContrastStats::default();
    }
    let passing = reports.iter().filter(|r| r.passes()).count();
    ContrastStats {
        total,
        passing,
        failing: total - passing,
        pass_rate: (passing as f64 / total as f64 * 100.0).round() as u32,
    }
}

/// Describe both text options for one audited color
///
/// White is only preferred when strictly better than black.
pub fn recommend(report: &ColorContrastReport) -> Recommendation {
    Recommendation {
        white_text: TextOption {
            suitable: report.white_passes,
            ratio: report.white_ratio,
            level: compliance_level(report.white_ratio),
        },
        black_text: TextOption {
            suitable: report.black_passes,
            ratio: report.black_ratio,
            level: compliance_level(report.black_ratio),
        },
        best_choice: if report.white_ratio > report.black_ratio {
            TextChoice::White
        } else {
            TextChoice::Black
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::conversion::{rgb_to_hex, rgb_to_hsl};

    fn sample(rgb: [u8; 3], percentage: f64) -> ColorSample {
        ColorSample {
            rgb,
            hex: rgb_to_hex(rgb),
            hsl: rgb_to_hsl(rgb),
            count: 1,
            percentage,
        }
    }

    #[test]
    fn test_audit_navy_and_yellow() {
        let palette = Palette::from(vec![sample([0, 0, 128], 60.0), sample([255, 255, 0], 40.0)]);
        let reports = audit_palette(&palette);

        assert_eq!(reports.len(), 2);
        assert!(reports[0].white_passes);
        assert!(!reports[0].black_passes);
        assert!(!reports[1].white_passes);
        assert!(reports[1].black_passes);
        assert_eq!(reports[1].color_index, 1);
    }

    #[test]
    fn test_stats_counts_either_text_color() {
        // #777777 fails with white (4.48) but passes with black (4.69)
        let palette = Palette::from(vec![
            sample([0, 0, 0], 50.0),
            sample([255, 255, 255], 30.0),
            sample([119, 119, 119], 20.0),
        ]);
        let reports = audit_palette(&palette);
        assert!(!reports[2].white_passes);
        assert!(reports[2].black_passes);

        let stats = contrast_stats(&reports);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.passing, 3);
        assert_eq!(stats.failing, 0);
        assert_eq!(stats.pass_rate, 100);
    }

    #[test]
    fn test_stats_empty() {
        assert_eq!(contrast_stats(&[]), ContrastStats::default());
    }

    #[test]
    fn test_stats_failing_color() {
        let report = ColorContrastReport {
            background: "#000000".to_string(),
            color_index: 0,
            white_ratio: 4.0,
            black_ratio: 4.0,
            white_passes: false,
            black_passes: false,
            percentage: 100.0,
        };
        let stats = contrast_stats(&[report]);
        assert_eq!(stats.failing, 1);
        assert_eq!(stats.pass_rate, 0);
    }

    #[test]
    fn test_skips_unparsable_hex() {
        let mut bad = sample([1, 2, 3], 10.0);
        bad.hex = "nope".to_string();
        let palette = Palette::from(vec![bad, sample([9, 9, 9], 90.0)]);
        let reports = audit_palette(&palette);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].color_index, 1);
    }

    #[test]
    fn test_measures_the_hex_not_the_rgb_field() {
        let mut drifted = sample([0, 0, 0], 100.0);
        drifted.hex = "#ffffff".to_string();
        let reports = audit_palette(&Palette::from(vec![drifted]));
        assert_eq!(reports[0].background, "#ffffff");
        assert!((reports[0].black_ratio - 21.0).abs() < 1e-9);
        assert!(!reports[0].white_passes);
        assert!(reports[0].black_passes);
    }

    #[test]
    fn test_recommendation_prefers_black_on_tie() {
        let report = ColorContrastReport {
            background: "#000000".to_string(),
            color_index: 0,
            white_ratio: 5.0,
            black_ratio: 5.0,
            white_passes: true,
            black_passes: true,
            percentage: 100.0,
        };
        assert_eq!(report.recommend().best_choice, TextChoice::Black);
    }

    #[test]
    fn test_recommendation_levels() {
        let palette = Palette::from(vec![sample([0, 0, 0], 100.0)]);
        let rec = recommend(&audit_palette(&palette)[0]);
        assert_eq!(rec.best_choice, TextChoice::White);
        assert_eq!(rec.white_text.level, ComplianceLevel::AAA);
        assert_eq!(rec.black_text.level, ComplianceLevel::Fail);
        assert_eq!(rec.best_choice.hex(), "#ffffff");
    }
}
