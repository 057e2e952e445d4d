//! Paste-related data models.

use crate::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How clients should interpret a paste body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasteKind {
    /// UTF-8 text, usually a JSON-encoded string.
    #[serde(alias = "-t")]
    Text,
    /// Raw file bytes.
    #[serde(alias = "-f")]
    File,
}

impl PasteKind {
    /// Wire name used in responses.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::File => "file",
        }
    }
}

impl fmt::Display for PasteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PasteKind {
    type Err = AppError;

    /// Accepts `text`/`file` (any case) and the short flags `-t`/`-f`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "-t" => Ok(Self::Text),
            "file" | "-f" => Ok(Self::File),
            other => Err(AppError::BadRequest(format!(
                "Unrecognized paste kind '{}'",
                other
            ))),
        }
    }
}

/// One stored upload.
///
/// Serialized with the field names clients already send (`user`, `type`,
/// `uploadBody`); the body travels as standard padded base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasteRecord {
    #[serde(rename = "user", alias = "owner")]
    pub owner: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: PasteKind,
    #[serde(rename = "uploadBody", alias = "body", with = "base64_body")]
    pub body: Vec<u8>,
}

impl PasteRecord {
    /// Create a record from its parts.
    pub fn new(owner: impl Into<String>, kind: PasteKind, body: Vec<u8>) -> Self {
        Self {
            owner: owner.into(),
            kind,
            body,
        }
    }
}

/// Request payload for storing a paste.
///
/// `kind` stays a string here so that an unknown value is reported as a
/// validation error by the service instead of a generic decode failure.
/// A `size` field sent by older clients is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadRequest {
    #[serde(default, rename = "user", alias = "owner")]
    pub owner: Option<String>,
    #[serde(rename = "type", alias = "kind")]
    pub kind: String,
    #[serde(
        default,
        rename = "uploadBody",
        alias = "body",
        deserialize_with = "base64_body::deserialize_optional"
    )]
    pub body: Option<Vec<u8>>,
}

impl UploadRequest {
    /// Build a request in-process, without going through JSON.
    pub fn new(owner: Option<&str>, kind: PasteKind, body: Vec<u8>) -> Self {
        Self {
            owner: owner.map(str::to_string),
            kind: kind.as_str().to_string(),
            body: Some(body),
        }
    }
}

/// Serde adapters for byte bodies carried as base64 strings.
pub mod base64_body {
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    /// Encode bytes as a base64 string.
    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(bytes))
    }

    /// Decode a base64 string into bytes.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        BASE64.decode(encoded.as_bytes()).map_err(D::Error::custom)
    }

    /// Decode an optional base64 string; JSON `null` maps to `None`.
    pub fn deserialize_optional<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        let encoded = Option::<String>::deserialize(deserializer)?;
        encoded
            .map(|value| BASE64.decode(value.as_bytes()).map_err(D::Error::custom))
            .transpose()
    }
}
