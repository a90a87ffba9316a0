//! Error types for Glimmer

use thiserror::Error;

/// The main error type for Glimmer operations
#[derive(Debug, Error)]
pub enum GlimmerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("Invalid config: {field} {reason}")]
    InvalidConfig { field: String, reason: String },
}

impl GlimmerError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        GlimmerError::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for Glimmer operations
pub type Result<T> = std::result::Result<T, GlimmerError>;

impl From<toml::de::Error> for GlimmerError {
    fn from(err: toml::de::Error) -> Self {
        GlimmerError::ConfigParse(err.to_string())
    }
}
