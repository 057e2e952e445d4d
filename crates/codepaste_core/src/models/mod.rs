//! Data models used by the API and in-memory stores.

/// Retrieval-code newtype and parsing.
pub mod code;
/// Paste record and upload request models.
pub mod paste;


pub use code::RetrievalCode;
pub use paste::{PasteKind, PasteRecord, UploadRequest};
