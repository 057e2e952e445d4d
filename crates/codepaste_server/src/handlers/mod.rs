//! HTTP request handlers.

pub(crate) mod decode;
/// Liveness and store counters.
pub mod health;
/// Paste upload and retrieval endpoints.
pub mod paste;
/// User registration endpoint.
pub mod user;
