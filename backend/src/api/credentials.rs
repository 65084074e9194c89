//! Credential settings API
//!
//! Sets or clears the optional completion API key. The key itself is never
//! returned to the caller.

use crate::error::AppError;
use crate::state::SharedState;
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

#[allow(missing_docs)]
#[derive(Debug, Serialize)]
pub struct CredentialStatus {
    /// True when an API key is set
    pub configured: bool,
    /// True when the completion service is enabled in configuration
    pub completion_enabled: bool,
}

#[allow(missing_docs)]
#[derive(Debug, Deserialize)]
pub struct UpdateCredentialsRequest {
    pub api_key: String,
}

async fn status(state: &SharedState) -> CredentialStatus {
    CredentialStatus {
        configured: state.widgets.has_api_key().await,
        completion_enabled: state.config.completion.enabled,
    }
}

/// `GET /api/credentials`
pub async fn get_credentials(State(state): State<SharedState>) -> Json<CredentialStatus> {
    Json(status(&state).await)
}

/// `PUT /api/credentials` - a blank key clears the stored value
pub async fn put_credentials(
    State(state): State<SharedState>,
    Json(request): Json<UpdateCredentialsRequest>,
) -> Result<Json<CredentialStatus>, AppError> {
    state.update_api_key(&request.api_key).await?;
    info!("API key updated");
    Ok(Json(status(&state).await))
}

/// `DELETE /api/credentials`
pub async fn delete_credentials(
    State(state): State<SharedState>,
) -> Result<StatusCode, AppError> {
    state.clear_api_key().await?;
    info!("API key cleared");
    Ok(StatusCode::NO_CONTENT)
}
