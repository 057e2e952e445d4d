//! Retrieval codes handed out for stored pastes.

use crate::constants::CODE_LENGTH;
use crate::AppError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Fixed-length, digits-only key for a stored paste.
///
/// Values are either generated by the paste store or validated by
/// [`RetrievalCode::parse`], so a `RetrievalCode` is always well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RetrievalCode(String);

impl RetrievalCode {
    /// Validate caller-supplied text as a retrieval code.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    /// Returns [`AppError::BadRequest`] when the code is empty, has the wrong
    /// length, or contains anything but ASCII digits.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::BadRequest("Retrieval code is empty".to_string()));
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::BadRequest(
                "Retrieval code must contain only digits".to_string(),
            ));
        }
        if trimmed.len() != CODE_LENGTH {
            return Err(AppError::BadRequest(format!(
                "Retrieval code must be {} digits",
                CODE_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Wrap generator output. Callers guarantee the digits-only shape.
    pub(crate) fn from_generated(digits: String) -> Self {
        debug_assert!(digits.bytes().all(|b| b.is_ascii_digit()));
        Self(digits)
    }

    /// Return this code as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RetrievalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Borrow<str> for RetrievalCode {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for RetrievalCode {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RetrievalCode> for String {
    fn from(value: RetrievalCode) -> Self {
        value.0
    }
}
