//! Accessibility scoring
//!
//! WCAG 2.1 contrast math and a palette-wide audit built on it.

pub mod contrast;
pub mod audit;

pub use audit::{audit_palette, contrast_stats, recommend, ColorContrastReport, ContrastStats};
pub use contrast::{
    best_text_color, check_compliance, compliance_level, contrast_ratio, optimal_text_color,
    relative_luminance, ComplianceLevel, ContrastResult, Grade, TextSize, WcagLevel,
};
