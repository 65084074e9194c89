//! Stateless matcher endpoint
//!
//! Answers a single text with the local knowledge base, without a widget,
//! a typing delay or the completion service.

use crate::api::utils::validate_message;
use crate::error::AppError;
use crate::matcher::{self, MatchPass};
use crate::state::SharedState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[allow(missing_docs)]
#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub text: String,
}

#[allow(missing_docs)]
#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub response: String,
    /// Which matcher pass selected the response
    #[serde(rename = "match")]
    pub pass: MatchPass,
}

/// `POST /api/match`
pub async fn match_text(
    State(state): State<SharedState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    validate_message(&request.text)?;
    let found = matcher::find_match(&state.knowledge, &request.text);
    Ok(Json(MatchResponse {
        response: found.response.to_string(),
        pass: found.pass,
    }))
}
