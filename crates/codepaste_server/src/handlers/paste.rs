//! Paste HTTP handlers.

use super::decode::decode_json;
use crate::{
    error::HttpError,
    models::{PasteRecord, RetrievalCode, UploadRequest},
    AppState,
};
use axum::{body::Bytes, extract::State, http::StatusCode, Json};

/// Store a paste and return its retrieval code.
///
/// Served on both `/paste` and `/upload`.
///
/// # Returns
/// `202 Accepted` with the code as a JSON string.
///
/// # Errors
/// Returns `406` for malformed input or an unknown kind, and `500` when no
/// code could be generated.
pub async fn create_paste(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<RetrievalCode>), HttpError> {
    let request: UploadRequest = decode_json(&body, "paste")?;
    let code = state.service.handle_upload(request)?;
    Ok((StatusCode::ACCEPTED, Json(code)))
}

/// Fetch a stored paste by code.
///
/// The body is a JSON string holding the code.
///
/// # Returns
/// `202 Accepted` with the stored record.
///
/// # Errors
/// Returns `406` for a malformed code and `404` when nothing is stored under
/// it.
pub async fn get_paste(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<PasteRecord>), HttpError> {
    let code: String = decode_json(&body, "get")?;
    let record = state.service.handle_get(&code)?;
    Ok((StatusCode::ACCEPTED, Json(record)))
}
