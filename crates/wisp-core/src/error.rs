//! Error types for Wisp

use thiserror::Error;

/// The main error type for Wisp operations
#[derive(Debug, Error)]
pub enum WispError {
    #[error("Invalid ticker bounds: {0}")]
    TickerBounds(String),

    #[error("Invalid ticker period: {0}")]
    TickerPeriod(String),

    #[error("Settings error: {0}")]
    SettingsError(String),

    #[error("Cue error: {0}")]
    CueError(String),

    #[error("Style error: {0}")]
    StyleError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

/// Result type alias for Wisp operations
pub type Result<T> = std::result::Result<T, WispError>;

impl From<toml::de::Error> for WispError {
    fn from(err: toml::de::Error) -> Self {
        WispError::TomlParseError(err.to_string())
    }
}
