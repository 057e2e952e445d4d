//! HTTP error mapping for API handlers.

use crate::AppError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Handler error that renders an [`AppError`] as a status plus JSON body.
#[derive(Debug)]
pub struct HttpError(pub AppError);

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl HttpError {
    /// Status code clients see for this error.
    pub fn status(&self) -> StatusCode {
        match self.0 {
            AppError::BadRequest(_) | AppError::NameTaken(_) => StatusCode::NOT_ACCEPTABLE,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::RandomnessUnavailable(_)
            | AppError::CodeSpaceExhausted { .. }
            | AppError::Poisoned(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.0 {
            AppError::RandomnessUnavailable(_) | AppError::CodeSpaceExhausted { .. } => {
                "Could not generate unique code".to_string()
            }
            AppError::Poisoned(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::HttpError;
    use crate::AppError;
    use axum::http::StatusCode;

    #[test]
    fn status_matrix_covers_every_error_kind() {
        let cases = [
            (AppError::BadRequest("x".to_string()), StatusCode::NOT_ACCEPTABLE),
            (AppError::NameTaken("x".to_string()), StatusCode::NOT_ACCEPTABLE),
            (AppError::NotFound, StatusCode::NOT_FOUND),
            (
                AppError::RandomnessUnavailable("x".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::CodeSpaceExhausted { attempts: 10 },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Poisoned("paste store"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let label = err.to_string();
            assert_eq!(HttpError::from(err).status(), expected, "error: {}", label);
        }
    }
}
