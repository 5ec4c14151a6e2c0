//! Transaction table handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use spendboard_core::views::{summarize, Summary};
use spendboard_core::Transaction;

/// GET /api/transactions - The full enriched table in sheet order
pub async fn list_transactions(State(state): State<Arc<AppState>>) -> Json<Vec<Transaction>> {
    Json(state.table.transactions().to_vec())
}

/// GET /api/summary
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<Summary> {
    Json(summarize(&state.table))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub transactions: usize,
}

/// GET /api/health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        transactions: state.table.len(),
    })
}
