use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::classify::Classified;
use super::exception::AppException;
use super::response::ResponseEnvelope;

/// Message used when a failure carries nothing printable
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Everything a request handler can fail with.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Known application exception
    #[error(transparent)]
    App(#[from] AppException),

    /// Request input failed validation; one message per violation
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// HTTP-level failure with no application error code
    #[error("{message}")]
    Http { status: StatusCode, message: String },

    /// Unexpected runtime error
    #[error(transparent)]
    Internal(#[from] anyhow::Error),

    /// Failure with no error value behind it, such as a caught panic
    #[error("{}", .0.as_deref().unwrap_or(UNKNOWN_ERROR_MESSAGE))]
    Unknown(Option<String>),
}

impl ApiError {
    pub fn http(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Wrap any error type as an unexpected failure
    pub fn internal<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Internal(anyhow::Error::new(err))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::http(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let classified = Classified::from_error(&self);
        let status = classified.payload.status_code;
        let body: ResponseEnvelope<()> = ResponseEnvelope::failure(&classified.payload);

        let mut response = (status, Json(body)).into_response();
        // Picked up by the error boundary for logging
        response.extensions_mut().insert(classified);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_display() {
        let err = ApiError::Validation(vec!["a bad".into(), "b worse".into()]);
        assert_eq!(err.to_string(), "Validation failed: a bad, b worse");
        assert_eq!(ApiError::Unknown(None).to_string(), "Unknown error");
        assert_eq!(
            ApiError::http(StatusCode::NOT_FOUND, "Cannot GET /x").to_string(),
            "Cannot GET /x"
        );
    }

    #[tokio::test]
    async fn test_into_response_status_conflict() {
        let err: ApiError = AppException::conflict(ErrorCode::DuplicateEmail).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert!(response.extensions().get::<Classified>().is_some());

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["statusCode"], 409);
        assert_eq!(body["error"]["code"], "DUPLICATE_EMAIL");
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn test_into_response_hides_internal_chain() {
        let err = ApiError::Internal(
            anyhow::anyhow!("socket closed").context("failed to reach mail relay"),
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "failed to reach mail relay");
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        assert!(!body.to_string().contains("socket closed"));
    }

    #[tokio::test]
    async fn test_into_response_plain_http_error() {
        let response = ApiError::http(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
            .into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Method Not Allowed");
    }
}
