//! Completion-specific error types

use thiserror::Error;

/// Errors returned by a completion client
#[derive(Error, Debug)]
pub enum CompletionError {
    /// No API key was supplied
    #[error("API key is empty")]
    MissingApiKey,

    /// The service rejected the credentials (HTTP 401)
    #[error("Completion API rejected the credentials")]
    Unauthorized,

    /// The service answered with a non-success status
    #[error("Completion API returned error status {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, as far as it could be read
        body: String,
    },

    /// The request never produced a response (DNS, TLS, timeout, ...)
    #[error("Failed to reach completion API: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the expected JSON
    #[error("Failed to parse completion response: {0}")]
    InvalidResponse(String),

    /// The response carried no usable text
    #[error("Completion response contains no message")]
    EmptyResponse,
}

impl CompletionError {
    /// True when the error means the configured key is bad
    pub fn is_credential_error(&self) -> bool {
        matches!(
            self,
            CompletionError::Unauthorized | CompletionError::MissingApiKey
        )
    }
}
