//! Error types for the exercise form coach library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image payload could not be decoded
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// JSON payload could not be parsed or produced
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Relay request rejected at the transport boundary
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Unknown exercise or bad evaluator parameters
    #[error("Evaluator error: {0}")]
    EvaluatorError(String),

    /// Recorded pose stream could not be read
    #[error("Pose stream error: {0}")]
    StreamError(String),

    /// Cue sink failed to signal
    #[error("Cue error: {0}")]
    CueError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic I/O error with description
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Application-specific error type (alias for main Error type)
pub type AppError = Error;

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
