//! Chat widget API
//!
//! One widget is one in-memory conversation. Flow per message:
//! user text -> session (busy check) -> responder -> typing delay -> bot reply.
//! Nothing is persisted; closing the widget drops its log.

use crate::api::utils::{find_session, validate_message};
use crate::chat::{ConversationMessage, Notification, SendOutcome};
use crate::error::AppError;
use crate::state::SharedState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Conversation snapshot
#[derive(Debug, Serialize)]
pub struct WidgetResponse {
    /// Session identifier
    pub session_id: String,
    /// Conversation log, oldest first
    pub messages: Vec<ConversationMessage>,
    /// True while a reply is being typed
    pub typing: bool,
}

#[allow(missing_docs)]
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

/// Result of a send
#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    /// "replied" or "ignored"
    pub status: String,
    /// Bot reply, when one was appended
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<ConversationMessage>,
    /// Notice to show next to the reply
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<NotificationBody>,
}

/// Notification as sent to the front end
#[derive(Debug, Serialize)]
pub struct NotificationBody {
    /// Machine-readable kind
    pub kind: Notification,
    /// Text to display
    pub message: String,
}

impl From<Notification> for NotificationBody {
    fn from(kind: Notification) -> Self {
        Self {
            kind,
            message: kind.message().to_string(),
        }
    }
}

/// `POST /api/widget` - open a widget
pub async fn open_widget(
    State(state): State<SharedState>,
) -> (StatusCode, Json<WidgetResponse>) {
    let session = state.widgets.open().await;
    (
        StatusCode::CREATED,
        Json(WidgetResponse {
            session_id: session.id().to_string(),
            messages: session.messages(),
            typing: session.is_typing(),
        }),
    )
}

/// `GET /api/widget/:id` - conversation snapshot
pub async fn get_widget(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<WidgetResponse>, AppError> {
    let session = find_session(&state, &id).await?;
    Ok(Json(WidgetResponse {
        session_id: id,
        messages: session.messages(),
        typing: session.is_typing(),
    }))
}

/// `DELETE /api/widget/:id` - close a widget
pub async fn close_widget(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.widgets.close(&id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::SessionNotFound(id))
    }
}

/// `POST /api/widget/:id/messages` - send a message and wait for the reply
pub async fn send_message(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, AppError> {
    validate_message(&request.text)?;
    let session = find_session(&state, &id).await?;

    // Runs detached so a dropped request cannot cut an exchange in half
    let text = request.text;
    let outcome = tokio::spawn(async move { session.send(&text).await })
        .await
        .map_err(|e| AppError::Internal(anyhow!("Send task failed: {}", e)))?;
    info!(session_id = %id, status = outcome.status(), "Message handled");

    match outcome {
        SendOutcome::Replied {
            reply,
            notification,
        } => Ok(Json(SendMessageResponse {
            status: "replied".to_string(),
            reply: Some(reply),
            notification: notification.map(NotificationBody::from),
        })),
        SendOutcome::Ignored => Ok(Json(SendMessageResponse {
            status: "ignored".to_string(),
            reply: None,
            notification: None,
        })),
        SendOutcome::Busy => Err(AppError::SessionBusy(id)),
        SendOutcome::Closed | SendOutcome::Discarded => Err(AppError::SessionClosed(id)),
    }
}
