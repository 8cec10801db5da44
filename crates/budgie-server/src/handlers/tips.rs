//! Financial tips and form option handlers

use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};

use budgie_core::{tips, UserType};

#[derive(Debug, Deserialize)]
pub struct TipsQuery {
    #[serde(default = "default_user_type")]
    pub user_type: String,
    #[serde(default = "default_topic")]
    pub topic: String,
}

fn default_user_type() -> String {
    UserType::default().to_string()
}

fn default_topic() -> String {
    "Budgeting".to_string()
}

#[derive(Debug, Serialize)]
pub struct TipsResponse {
    pub text: String,
}

/// Dropdown choices for the form
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub user_types: Vec<&'static str>,
    pub topics: Vec<&'static str>,
}

/// GET /api/tips - Tips for a user type and topic
pub async fn get_tips(Query(params): Query<TipsQuery>) -> Json<TipsResponse> {
    Json(TipsResponse {
        text: tips::tips(&params.user_type, &params.topic),
    })
}

/// GET /api/options - User types and topics for the dropdowns
pub async fn options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        user_types: UserType::all().iter().map(|t| t.as_str()).collect(),
        topics: tips::topics().to_vec(),
    })
}
