//! Budget analysis and spending insight handlers
//!
//! Both answer with a [`Panel`]: report text plus chart on success, the
//! user-facing error text and no chart otherwise.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::debug;

use crate::AppState;
use budgie_core::{budget, spending, Panel};

#[derive(Debug, Deserialize)]
pub struct BudgetRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SpendingRequest {
    pub name: String,
    #[serde(default)]
    pub data: String,
}

/// POST /api/budget - Budget summary for a profile
pub async fn budget_analysis(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BudgetRequest>,
) -> Json<Panel> {
    let result = budget::summarize(&state.profiles, &req.name);
    if let Err(e) = &result {
        debug!(kind = e.kind(), name = %req.name, "Budget summary unavailable");
    }
    Json(Panel::from_result(result))
}

/// POST /api/spending - Spending breakdown from `Category,Amount` lines
pub async fn spending_analysis(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SpendingRequest>,
) -> Json<Panel> {
    let result = spending::analyze(&state.profiles, &req.name, &req.data);
    if let Err(e) = &result {
        debug!(kind = e.kind(), name = %req.name, "Spending analysis rejected");
    }
    Json(Panel::from_result(result))
}
