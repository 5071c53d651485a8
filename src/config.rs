//! Configuration for the palette extraction pipeline.
//!
//! [`ExtractionConfig`] carries the four tunables recognized by the pipeline.
//! Field names serialize as the wire keys (`MAX_COLORS`, `MIN_PERCENTAGE`,
//! `SAMPLE_RATE`, `QUANTIZATION_FACTOR`) and every key is optional: missing
//! keys take the defaults from [`crate::constants::sampling`].
//!
//! # Configuration Loading
//!
//! ```no_run
//! use chroma_palette::ExtractionConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = ExtractionConfig::from_json_file(Path::new("palette.json"))?;
//!
//! // Or use defaults
//! let config = ExtractionConfig::default();
//! # Ok::<(), chroma_palette::PaletteError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::sampling;
use crate::{PaletteError, Result};

/// Tunable parameters for one palette extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct ExtractionConfig {
    /// Upper bound on palette length
    pub max_colors: u32,

    /// Candidates whose share of sampled pixels is at or below this
    /// percentage are discarded
    pub min_percentage: f64,

    /// Byte stride between samples; 4 samples every pixel
    pub sample_rate: u32,

    /// Grid step each channel is rounded to
    pub quantization_factor: u32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_colors: sampling::MAX_COLORS,
            min_percentage: sampling::MIN_PERCENTAGE,
            sample_rate: sampling::SAMPLE_RATE,
            quantization_factor: sampling::QUANTIZATION_FACTOR,
        }
    }
}

/// Partial extraction settings carried on a worker request
///
/// Present keys replace the matching fields of a base configuration; absent
/// keys leave them untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ConfigOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_colors: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantization_factor: Option<u32>,
}

impl ConfigOverrides {
    /// Overlay these keys onto `base`
    pub fn apply_to(&self, base: &ExtractionConfig) -> ExtractionConfig {
        ExtractionConfig {
            max_colors: self.max_colors.unwrap_or(base.max_colors),
            min_percentage: self.min_percentage.unwrap_or(base.min_percentage),
            sample_rate: self.sample_rate.unwrap_or(base.sample_rate),
            quantization_factor: self.quantization_factor.unwrap_or(base.quantization_factor),
        }
    }
}

impl From<ExtractionConfig> for ConfigOverrides {
    fn from(config: ExtractionConfig) -> Self {
        Self {
            max_colors: Some(config.max_colors),
            min_percentage: Some(config.min_percentage),
            sample_rate: Some(config.sample_rate),
            quantization_factor: Some(config.quantization_factor),
        }
    }
}

impl ExtractionConfig {
    /// Check preconditions before any sampling begins
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidParameter`] when `MAX_COLORS`,
    /// `SAMPLE_RATE` or `QUANTIZATION_FACTOR` is zero, or `MIN_PERCENTAGE`
    /// is outside `[0, 100)`.
    pub fn validate(&self) -> Result<()> {
        if self.max_colors == 0 {
            return Err(PaletteError::invalid_parameter("MAX_COLORS", self.max_colors));
        }
        if self.sample_rate == 0 {
            return Err(PaletteError::invalid_parameter("SAMPLE_RATE", self.sample_rate));
        }
        if self.quantization_factor == 0 {
            return Err(PaletteError::invalid_parameter(
                "QUANTIZATION_FACTOR",
                self.quantization_factor,
            ));
        }
        if !(0.0..100.0).contains(&self.min_percentage) {
            return Err(PaletteError::invalid_parameter(
                "MIN_PERCENTAGE",
                self.min_percentage,
            ));
        }
        Ok(())
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PaletteError::config_io(format!("cannot read {}", path.display()), e)
        })?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string; absent keys keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| PaletteError::config_format("invalid extraction config", e))
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PaletteError::config_format("cannot serialize extraction config", e))?;
        std::fs::write(path, json).map_err(|e| {
            PaletteError::config_io(format!("cannot write {}", path.display()), e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_colors, 8);
        assert_eq!(config.sample_rate, 40);
        assert_eq!(config.quantization_factor, 25);
        assert_eq!(config.min_percentage, 1.0);
    }

    #[test]
    fn test_zero_quantization_factor_rejected() {
        let config = ExtractionConfig {
            quantization_factor: 0,
            ..ExtractionConfig::default()
        };
        match config.validate() {
            Err(PaletteError::InvalidParameter { parameter, .. }) => {
                assert_eq!(parameter, "QUANTIZATION_FACTOR")
            }
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_max_colors_rejected() {
        let config = ExtractionConfig {
            max_colors: 0,
            ..ExtractionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_sample_rate_rejected() {
        let config = ExtractionConfig {
            sample_rate: 0,
            ..ExtractionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_min_percentage_bounds() {
        let nan = ExtractionConfig {
            min_percentage: f64::NAN,
            ..ExtractionConfig::default()
        };
        assert!(nan.validate().is_err());

        let full = ExtractionConfig {
            min_percentage: 100.0,
            ..ExtractionConfig::default()
        };
        assert!(full.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ExtractionConfig::from_json_str(r#"{"MAX_COLORS": 4}"#).unwrap();
        assert_eq!(config.max_colors, 4);
        assert_eq!(config.quantization_factor, 25);
        assert_eq!(config.sample_rate, 40);
    }

    #[test]
    fn test_overrides_replace_only_present_keys() {
        let base = ExtractionConfig {
            max_colors: 1,
            quantization_factor: 10,
            ..ExtractionConfig::default()
        };
        let overrides: ConfigOverrides = serde_json::from_str(r#"{"SAMPLE_RATE": 4}"#).unwrap();
        let merged = overrides.apply_to(&base);
        assert_eq!(merged.max_colors, 1);
        assert_eq!(merged.quantization_factor, 10);
        assert_eq!(merged.sample_rate, 4);
        assert_eq!(merged.min_percentage, 1.0);
    }

    #[test]
    fn test_full_overrides_replace_everything() {
        let full = ExtractionConfig {
            max_colors: 3,
            min_percentage: 5.0,
            sample_rate: 8,
            quantization_factor: 16,
        };
        let merged = ConfigOverrides::from(full.clone()).apply_to(&ExtractionConfig::default());
        assert_eq!(merged, full);
        assert_eq!(
            serde_json::to_value(ConfigOverrides::default()).unwrap(),
            serde_json::json!({})
        );
    }

    #[test]
    fn test_wire_key_names() {
        let json = serde_json::to_value(ExtractionConfig::default()).unwrap();
        assert_eq!(json["MAX_COLORS"], 8);
        assert_eq!(json["MIN_PERCENTAGE"], 1.0);
        assert_eq!(json["SAMPLE_RATE"], 40);
        assert_eq!(json["QUANTIZATION_FACTOR"], 25);
    }

    #[test]
    fn test_json_file_roundtrip() {
        let path = std::env::temp_dir().join(format!(
            "chroma_palette_config_{}.json",
            std::process::id()
        ));
        let config = ExtractionConfig {
            max_colors: 5,
            ..ExtractionConfig::default()
        };
        config.to_json_file(&path).unwrap();
        let loaded = ExtractionConfig::from_json_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_config_io() {
        let result = ExtractionConfig::from_json_file(Path::new("/nonexistent/palette.json"));
        assert!(matches!(result, Err(PaletteError::ConfigIo { .. })));
    }
}
