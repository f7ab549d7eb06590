//! Error types

use thiserror::Error;

/// Errors from renderer state changes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Light slots are numbered 1 through 8
    #[error("invalid light index {0}: expected 1..=8")]
    InvalidLightIndex(usize),
}

/// Errors that can occur when loading or saving renderer settings
#[derive(Error, Debug)]
pub enum SettingsError {
    /// TOML parsing error
    #[error("settings parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("settings serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
