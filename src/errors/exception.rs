use axum::http::StatusCode;
use serde_json::{Map, Value};

use super::codes::ErrorCode;

/// A business-rule violation raised from application code.
///
/// Carries exactly one [`ErrorCode`]. The message defaults to the code's
/// default message and the status to 500; the named constructors fix the
/// status for the common failure families.
#[derive(Debug, Clone, thiserror::Error)]
#[error("[{error_code}] {message}")]
pub struct AppException {
    pub error_code: ErrorCode,
    pub message: String,
    pub status: StatusCode,
    /// Diagnostic key/value data. Logged, never sent to the client.
    pub context: Map<String, Value>,
}

impl AppException {
    pub fn new(error_code: ErrorCode) -> Self {
        Self {
            error_code,
            message: error_code.default_message().to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            context: Map::new(),
        }
    }

    /// 422 Unprocessable Entity
    pub fn business(error_code: ErrorCode) -> Self {
        Self::new(error_code).with_status(StatusCode::UNPROCESSABLE_ENTITY)
    }

    /// 409 Conflict
    pub fn conflict(error_code: ErrorCode) -> Self {
        Self::new(error_code).with_status(StatusCode::CONFLICT)
    }

    pub fn conflict_default() -> Self {
        Self::conflict(ErrorCode::Conflict)
    }

    /// 404 Not Found
    pub fn entity_not_found(error_code: ErrorCode) -> Self {
        Self::new(error_code).with_status(StatusCode::NOT_FOUND)
    }

    pub fn not_found_default() -> Self {
        Self::entity_not_found(ErrorCode::EntityNotFound)
    }

    /// 403 Forbidden
    pub fn forbidden_operation(error_code: ErrorCode) -> Self {
        Self::new(error_code).with_status(StatusCode::FORBIDDEN)
    }

    pub fn forbidden_default() -> Self {
        Self::forbidden_operation(ErrorCode::ForbiddenOperation)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Add a single diagnostic entry
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let err = AppException::new(ErrorCode::InternalError);
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "An unexpected error occurred");
        assert!(err.context.is_empty());
    }

    #[test]
    fn test_fixed_status_constructors() {
        assert_eq!(
            AppException::business(ErrorCode::InvalidCredentials).status,
            StatusCode::UNPROCESSABLE_ENTITY
        );

        let conflict = AppException::conflict_default();
        assert_eq!(conflict.status, StatusCode::CONFLICT);
        assert_eq!(conflict.error_code, ErrorCode::Conflict);

        let missing = AppException::not_found_default();
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
        assert_eq!(missing.error_code, ErrorCode::EntityNotFound);

        let forbidden = AppException::forbidden_default();
        assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
        assert_eq!(forbidden.error_code, ErrorCode::ForbiddenOperation);
    }

    #[test]
    fn test_subtype_keeps_explicit_code() {
        let err = AppException::conflict(ErrorCode::DuplicateEmail);
        assert_eq!(err.error_code, ErrorCode::DuplicateEmail);
        assert_eq!(err.message, "A user with this email already exists");
    }

    #[test]
    fn test_builders() {
        let err = AppException::entity_not_found(ErrorCode::UserNotFound)
            .with_message("No user 42")
            .with_context("user_id", 42);
        assert_eq!(err.message, "No user 42");
        assert_eq!(err.context.get("user_id"), Some(&json!(42)));
        assert_eq!(err.to_string(), "[USER_NOT_FOUND] No user 42");
    }
}
