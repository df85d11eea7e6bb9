//! Error types for vb-stt

use thiserror::Error;

/// vb-stt error type
#[derive(Error, Debug)]
pub enum SttError {
    /// The provider rejected the request. Status and body are preserved
    /// verbatim so the API layer can relay them unaltered.
    #[error("Provider returned status {status}")]
    Provider {
        status: u16,
        body: String,
        content_type: Option<String>,
    },

    #[error("Invalid audio format: {0}")]
    InvalidFormat(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SttError>;
