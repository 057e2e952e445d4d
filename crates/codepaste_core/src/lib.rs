//! Core domain library for CodePaste (config, registry, paste store, service).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants used across CodePaste crates.
pub mod constants;
/// Process-global environment mutation helpers.
pub mod env;
/// Application error types (validation/conflict/environment faults).
pub mod error;
/// Data models for API requests and stored records.
pub mod models;
/// Username registry.
pub mod registry;
/// Request orchestration over the registry and paste store.
pub mod service;
/// In-memory paste store and retrieval-code generation.
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{Config, NamePolicy};
pub use constants::{ANONYMOUS_OWNER, CODE_LENGTH, DEFAULT_CLI_SERVER_URL, DEFAULT_PORT};
pub use error::AppError;
pub use registry::UserRegistry;
pub use service::PasteService;
pub use store::{CodeSource, OsCodeSource, PasteStore};
