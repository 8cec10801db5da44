//! Profile setup handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::{AppError, AppState};
use budgie_core::{NewProfile, UserProfile};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /api/profiles - Create or replace a profile
pub async fn create_profile(
    State(state): State<Arc<AppState>>,
    Json(profile): Json<NewProfile>,
) -> Json<MessageResponse> {
    let message = state.profiles.create_or_replace(profile);
    Json(MessageResponse { message })
}

/// GET /api/profiles - List profiles by name
pub async fn list_profiles(State(state): State<Arc<AppState>>) -> Json<Vec<UserProfile>> {
    Json(state.profiles.list())
}

/// GET /api/profiles/:name - Get a single profile
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    state
        .profiles
        .get(&name)
        .map(Json)
        .ok_or_else(|| AppError::not_found("Profile not found"))
}
