//! Health endpoint.

use crate::{error::HttpError, AppState};
use axum::{extract::State, Json};
use serde::Serialize;

/// Health payload with live counters.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub users: usize,
    pub pastes: usize,
}

/// Report liveness plus how many users and pastes are held in memory.
///
/// # Errors
/// Returns `500` when a store lock is poisoned.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, HttpError> {
    Ok(Json(HealthResponse {
        status: "ok",
        users: state.service.users().len()?,
        pastes: state.service.pastes().len()?,
    }))
}
