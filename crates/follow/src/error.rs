//! Error types for the follow crate

use thiserror::Error;

/// Result type alias for follow operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading controller configuration
///
/// The per-frame cycle never fails; every missing dependency there degrades
/// to a fallback behavior instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Config file could not be read
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for the expected schema
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config values are present but unusable
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
