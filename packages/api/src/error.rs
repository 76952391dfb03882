use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kb_usecases::UseCaseError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

/// Error type returned by every API handler
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    UseCase(#[from] UseCaseError),
}

/// Structured error response format for API consistency
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: ErrorDetail,
    request_id: String,
}

/// Error detail structure with machine-readable codes
#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Convert ApiError to appropriate HTTP status code and error code
    fn to_status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::UseCase(use_case_error) => match use_case_error {
                UseCaseError::QuestionNotFound(_) => (StatusCode::NOT_FOUND, "QUESTION_NOT_FOUND"),
                UseCaseError::TagNotFound(_) => (StatusCode::NOT_FOUND, "TAG_NOT_FOUND"),
                UseCaseError::InvalidTag(_) => (StatusCode::BAD_REQUEST, "INVALID_TAG"),
                UseCaseError::InvalidQuestion(_) => (StatusCode::BAD_REQUEST, "INVALID_QUESTION"),
                UseCaseError::ConcurrentModification { .. } => {
                    (StatusCode::CONFLICT, "CONCURRENT_MODIFICATION")
                }
                UseCaseError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            },
        }
    }

    /// Get user-facing error message; storage details stay in the logs
    fn to_user_message(&self) -> String {
        match self {
            ApiError::Validation(msg) => format!("Validation failed: {}", msg),
            ApiError::UseCase(UseCaseError::Storage(_)) => "Data storage error".to_string(),
            ApiError::UseCase(use_case_error) => use_case_error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let (status_code, error_code) = self.to_status_and_code();

        match &self {
            ApiError::UseCase(UseCaseError::Storage(storage_error)) => {
                error!(
                    request_id = %request_id,
                    storage_error = %storage_error,
                    "Storage system error"
                );
            }
            _ => {
                // Caller errors are expected business outcomes
                info!(
                    request_id = %request_id,
                    error_code = %error_code,
                    error = %self,
                    "API error response"
                );
            }
        }

        let error_response = ErrorResponse {
            success: false,
            error: ErrorDetail {
                code: error_code.to_string(),
                message: self.to_user_message(),
            },
            request_id,
        };

        (status_code, Json(error_response)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
