//! Theme engine error types

use thiserror::Error;

/// Theme-related errors
#[derive(Error, Debug)]
pub enum ThemeError {
    /// No theme registered under this key
    #[error("Theme not found: {0}")]
    NotFound(String),

    /// A theme with this key is already registered
    #[error("Theme already registered: {0}")]
    DuplicateTheme(String),

    /// Text could not be parsed as an `"<h> <s>% <l>%"` triple
    #[error("Invalid HSL triple: {0:?}")]
    InvalidHsl(String),

    /// A palette component lies outside its nominal range
    #[error("HSL component out of range in theme {theme:?}: {detail}")]
    OutOfRange { theme: String, detail: String },

    /// Unknown color scheme or mode name
    #[error("Invalid color scheme: {0:?}")]
    InvalidScheme(String),

    /// Theme file could not be parsed
    #[error("Theme file parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Durable storage failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<std::io::Error> for ThemeError {
    fn from(err: std::io::Error) -> Self {
        ThemeError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ThemeError {
    fn from(err: serde_json::Error) -> Self {
        ThemeError::Storage(err.to_string())
    }
}

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;
