//! API utility functions
//!
//! Validation and lookup helpers shared by the handlers.

use crate::chat::ChatSession;
use crate::constants::MAX_MESSAGE_LENGTH;
use crate::error::AppError;
use crate::state::SharedState;
use std::sync::Arc;

/// Validate message length
///
/// Blank messages are allowed through; the session treats them as a no-op.
///
/// # Returns
/// * `Ok(())` - Message is acceptable
/// * `Err(AppError)` - Message exceeds `MAX_MESSAGE_LENGTH` characters
pub fn validate_message(text: &str) -> Result<(), AppError> {
    if text.trim().chars().count() > MAX_MESSAGE_LENGTH {
        return Err(AppError::InvalidMessage(format!(
            "Message exceeds maximum length of {} characters",
            MAX_MESSAGE_LENGTH
        )));
    }
    Ok(())
}

/// Find an open widget or fail with `SessionNotFound`
///
/// A successful lookup counts as activity for idle eviction.
pub async fn find_session(state: &SharedState, id: &str) -> Result<Arc<ChatSession>, AppError> {
    let session = state
        .widgets
        .get(id)
        .await
        .ok_or_else(|| AppError::SessionNotFound(id.to_string()))?;
    session.touch();
    Ok(session)
}
