//! Application error types for core registry, store, and service logic.
use thiserror::Error;

/// Top-level application error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Name already taken: {0}")]
    NameTaken(String),

    #[error("Not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Randomness source unavailable: {0}")]
    RandomnessUnavailable(String),

    #[error("No free retrieval code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },

    #[error("Storage error: {0}")]
    Poisoned(&'static str),
}

impl AppError {
    /// Whether this error is an environment fault rather than a caller mistake.
    ///
    /// # Returns
    /// `true` for randomness failures, code-space exhaustion, and poisoned locks.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::RandomnessUnavailable(_) | Self::CodeSpaceExhausted { .. } | Self::Poisoned(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn internal_classification_separates_faults_from_rejections() {
        assert!(AppError::RandomnessUnavailable("no entropy".to_string()).is_internal());
        assert!(AppError::CodeSpaceExhausted { attempts: 10 }.is_internal());
        assert!(AppError::Poisoned("paste store").is_internal());

        assert!(!AppError::NotFound.is_internal());
        assert!(!AppError::NameTaken("alice".to_string()).is_internal());
        assert!(!AppError::BadRequest("empty code".to_string()).is_internal());
    }

    #[test]
    fn exhaustion_message_names_attempt_count() {
        let err = AppError::CodeSpaceExhausted { attempts: 3 };
        assert_eq!(err.to_string(), "No free retrieval code after 3 attempts");
    }
}
