//! User registration handler.

use super::decode::decode_json;
use crate::{error::HttpError, AppState};
use axum::{body::Bytes, extract::State, http::StatusCode};

/// Claim a user name.
///
/// The body is a JSON string holding the name.
///
/// # Returns
/// `202 Accepted` with an empty body.
///
/// # Errors
/// Returns `406` when the body is malformed, the name violates the name
/// policy, or the name is already taken.
pub async fn register_user(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, HttpError> {
    let name: String = decode_json(&body, "register")?;
    state.service.handle_register(&name)?;
    Ok(StatusCode::ACCEPTED)
}
