//! Error types for mead-web
//!
//! Every handler failure is rendered as `{"error": "<message>"}` with a
//! matching status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mead_common::StoreError;
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("{0}")]
    BadRequest(String),

    /// Missing or wrong admin credentials (401)
    #[error("Unauthorized")]
    Unauthorized,

    /// Resource not found (404)
    #[error("{0}")]
    NotFound(String),

    /// Internal server error (500)
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.to_string(),
        }));

        (self.status(), body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateName => ApiError::BadRequest(err.to_string()),
            StoreError::NotFound => ApiError::NotFound(err.to_string()),
            StoreError::Io(_) | StoreError::Serialize(_) => {
                tracing::error!("Submission store failure: {}", err);
                ApiError::Internal("Failed to save submission".to_string())
            }
        }
    }
}

impl From<mead_common::Error> for ApiError {
    fn from(err: mead_common::Error) -> Self {
        match err {
            mead_common::Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_statuses() {
        assert_eq!(
            ApiError::from(StoreError::DuplicateName).status(),
            StatusCode::BAD_REQUEST
        );
        let not_found = ApiError::from(StoreError::NotFound);
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            not_found.to_string(),
            "No existing submission found for that name."
        );
    }

    #[test]
    fn test_invalid_input_keeps_message() {
        let err = ApiError::from(mead_common::Error::InvalidInput(
            "Name is required".to_string(),
        ));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Name is required");
    }
}
