//! Error types for the chroma_palette library

use thiserror::Error;

/// Result type alias for chroma_palette operations
pub type Result<T> = std::result::Result<T, PaletteError>;

/// Comprehensive error types for palette extraction and theming operations
#[derive(Error, Debug)]
pub enum PaletteError {
    /// Invalid input parameters (configuration or buffer shape)
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Color string could not be parsed
    #[error("Malformed color {input:?}: {reason}")]
    MalformedColor { input: String, reason: String },

    /// Configuration file could not be read or written
    #[error("Configuration I/O error: {message}")]
    ConfigIo {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid JSON for the expected schema
    #[error("Configuration format error: {message}")]
    ConfigFormat {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Worker channel closed or message could not be exchanged
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Generic processing error
    #[error("Processing error: {message}")]
    ProcessingError { message: String },
}

impl PaletteError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Create a malformed color error
    pub fn malformed_color(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedColor {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration I/O error with context
    pub fn config_io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::ConfigIo {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration format error with context
    pub fn config_format(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::ConfigFormat {
            message: message.into(),
            source,
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Check if this error indicates a recoverable condition
    ///
    /// Malformed colors degrade to neutral defaults and transport failures can
    /// be retried on a fresh worker; configuration problems need the caller to
    /// change its input.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PaletteError::MalformedColor { .. } | PaletteError::Transport { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            PaletteError::InvalidParameter { parameter, .. } => {
                format!("The analysis setting '{}' is not valid. Correct it before running the analysis again.", parameter)
            }
            PaletteError::MalformedColor { input, .. } => {
                format!("'{}' is not a valid color. Use the #rrggbb format.", input)
            }
            PaletteError::ConfigIo { .. } | PaletteError::ConfigFormat { .. } => {
                "Could not load the analysis settings. Please check the configuration file.".to_string()
            }
            PaletteError::Transport { .. } => {
                "The color analysis service is unavailable. Please try again.".to_string()
            }
            PaletteError::ProcessingError { .. } => {
                "Color analysis failed. Please try with a different image.".to_string()
            }
        }
    }
}
