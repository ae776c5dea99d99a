//! Error types for the vitals coach Lambda.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while answering a vitals question.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed client input
    #[error("{0}")]
    Validation(String),

    /// Missing or unusable server configuration
    #[error("{0}")]
    Config(String),

    /// AWS SDK error (Bedrock, Timestream)
    #[error("AWS error: {0}")]
    Aws(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            _ => 500,
        }
    }

    /// Whether the error is reported to the caller as an `{"error": ...}` body.
    ///
    /// Everything else propagates to the Lambda runtime untouched.
    pub fn is_client_visible(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::Config(_))
    }
}
