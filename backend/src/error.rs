//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! All errors implement `IntoResponse` to provide consistent error formatting.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
///
/// Each variant implements automatic conversion to HTTP responses via `IntoResponse`.
#[derive(Error, Debug)]
pub enum AppError {
    /// No open widget with the given ID
    #[error("Chat session not found: {0}")]
    SessionNotFound(String),

    /// The widget is still typing the previous reply
    #[error("Chat session is busy: {0}")]
    SessionBusy(String),

    /// The widget was closed
    #[error("Chat session is closed: {0}")]
    SessionClosed(String),

    /// Message failed validation (e.g. too long)
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// Credential file could not be read or written
    #[error("Credential storage error: {0}")]
    Credentials(#[from] crate::credentials::CredentialError),

    /// Knowledge base could not be loaded
    #[error("Knowledge base error: {0}")]
    Knowledge(#[from] crate::knowledge::KnowledgeError),

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            AppError::SessionBusy(_) => StatusCode::CONFLICT,
            AppError::SessionClosed(_) => StatusCode::GONE,
            AppError::InvalidMessage(_) => StatusCode::BAD_REQUEST,
            AppError::Credentials(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Knowledge(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
