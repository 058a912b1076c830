//! Error types for symptrack-core

use thiserror::Error;

/// Main error type for the symptrack-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Requested analytics window is neither a positive day count nor "all time"
    #[error("invalid analytics window: {0}")]
    InvalidWindow(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for symptrack-core
pub type Result<T> = std::result::Result<T, Error>;
