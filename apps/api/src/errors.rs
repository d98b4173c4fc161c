use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::screenings::store::StoreError;

/// Message returned for any unknown screening id.
pub const INVALID_SCREENING_ID: &str = "Invalid screening ID";

/// Generic body for server errors. Details are logged, never surfaced.
const SOMETHING_WENT_WRONG: &str = "Something went wrong.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(StoreError),

    #[error("Upstream LLM error: {0}")]
    Upstream(#[from] LlmError),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            // An update against an unknown id reads the same to the caller
            // as a failed fetch.
            StoreError::NotFound(_) => AppError::NotFound(INVALID_SCREENING_ID.to_string()),
            other => AppError::Storage(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Storage(e) => {
                tracing::error!("storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SOMETHING_WENT_WRONG.to_string(),
                )
            }
            AppError::Upstream(e) => {
                tracing::error!("upstream LLM error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SOMETHING_WENT_WRONG.to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let response = AppError::Validation("Missing required field: id".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = AppError::NotFound(INVALID_SCREENING_ID.to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_store_duplicate_maps_to_server_error() {
        let err: AppError = StoreError::Duplicate("abc123".to_string()).into();
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_not_found_becomes_invalid_screening_id() {
        let err: AppError = StoreError::NotFound("abc123".to_string()).into();
        match err {
            AppError::NotFound(msg) => assert_eq!(msg, INVALID_SCREENING_ID),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_upstream_maps_to_server_error() {
        let err: AppError = LlmError::EmptyChoices.into();
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
