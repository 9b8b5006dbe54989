//! Error types for smokesim

use thiserror::Error;

/// The main error type for smokesim operations
#[derive(Debug, Error)]
pub enum SmokeError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Image error: {0}")]
    Image(String),

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for smokesim operations
pub type Result<T> = std::result::Result<T, SmokeError>;
