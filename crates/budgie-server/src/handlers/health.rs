//! Health check handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use budgie_core::AIBackend;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ai_backend: &'static str,
    pub ai_model: String,
    pub ai_available: bool,
}

/// GET /api/health - Server and AI backend status
///
/// The server is "ok" even when the model is down; chat then apologizes.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let client = state.advisor.client();
    Json(HealthResponse {
        status: "ok",
        ai_backend: client.backend_name(),
        ai_model: client.model().to_string(),
        ai_available: client.health_check().await,
    })
}
