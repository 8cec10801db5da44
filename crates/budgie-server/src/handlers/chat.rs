//! Financial chat handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState};
use budgie_core::UserType;

/// Request body for a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// "Student" selects the student persona; anything else gets the professional one
    #[serde(default)]
    pub user_type: Option<String>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Resolve the persona for a free-form user type
pub(crate) fn chat_user_type(raw: Option<&str>) -> UserType {
    match raw {
        None => UserType::Student,
        Some(raw) => raw.parse().unwrap_or(UserType::Professional),
    }
}

/// POST /api/chat - Ask the advisor a question
///
/// Generation failures still answer 200 with the apology as the reply.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if req.message.trim().is_empty() {
        return Err(AppError::bad_request("Message is required"));
    }

    let user_type = chat_user_type(req.user_type.as_deref());
    let max_tokens = req.max_tokens.unwrap_or(state.settings.ai.max_tokens);

    let reply = state
        .advisor
        .reply(&req.message, user_type, max_tokens)
        .await;

    Ok(Json(ChatResponse { reply }))
}
