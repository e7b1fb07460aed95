//! Normalization of raised errors into a single payload shape.

use axum::http::StatusCode;
use serde_json::{Map, Value};

use super::api_error::{ApiError, UNKNOWN_ERROR_MESSAGE};
use super::codes::ErrorCode;
use super::details::{group_violations, ViolationDetails};

/// Normalized form of any failure, ready to be enveloped
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorResponsePayload {
    pub status_code: StatusCode,
    pub message: String,
    pub error_code: Option<ErrorCode>,
    pub details: Option<ViolationDetails>,
}

/// Classify a raised error. First matching rule wins:
///
/// 1. application exceptions keep their status, message and code;
/// 2. validation failures become 400 `VALIDATION_ERROR` with grouped details;
/// 3. other HTTP errors pass through without a code;
/// 4. anything else is a 500 `INTERNAL_ERROR`.
pub fn classify(error: &ApiError) -> ErrorResponsePayload {
    match error {
        ApiError::App(exception) => ErrorResponsePayload {
            status_code: exception.status,
            message: exception.message.clone(),
            error_code: Some(exception.error_code),
            details: None,
        },
        ApiError::Validation(messages) => ErrorResponsePayload {
            status_code: StatusCode::BAD_REQUEST,
            message: ErrorCode::ValidationError.default_message().to_string(),
            error_code: Some(ErrorCode::ValidationError),
            details: Some(group_violations(messages)),
        },
        ApiError::Http { status, message } => ErrorResponsePayload {
            status_code: *status,
            message: message.clone(),
            error_code: None,
            details: None,
        },
        ApiError::Internal(err) => internal(err.to_string()),
        ApiError::Unknown(message) => internal(
            message
                .clone()
                .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string()),
        ),
    }
}

fn internal(message: String) -> ErrorResponsePayload {
    ErrorResponsePayload {
        status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message,
        error_code: Some(ErrorCode::InternalError),
        details: None,
    }
}

/// A classified failure plus the server-side diagnostics that never reach
/// the client.
#[derive(Debug, Clone)]
pub struct Classified {
    pub payload: ErrorResponsePayload,
    /// Context map of an application exception
    pub context: Option<Map<String, Value>>,
    /// Error chain for unexpected failures
    pub stack: Option<String>,
}

impl Classified {
    pub fn from_error(error: &ApiError) -> Self {
        let context = match error {
            ApiError::App(exception) => Some(exception.context.clone()),
            _ => None,
        };
        let stack = match error {
            ApiError::Internal(err) => Some(format!("{err:?}")),
            _ => None,
        };

        Self {
            payload: classify(error),
            context,
            stack,
        }
    }
}
