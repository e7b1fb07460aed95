use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Error codes for structured API responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unexpected failure with no better classification
    InternalError,

    /// Request input failed validation
    ValidationError,

    /// Caller is not authenticated
    Unauthorized,

    /// Caller is authenticated but not allowed to do this
    ForbiddenOperation,

    /// Supplied credentials were rejected
    InvalidCredentials,

    /// Generic missing resource
    EntityNotFound,

    /// User lookup came back empty
    UserNotFound,

    /// Generic state conflict
    Conflict,

    /// Email address already registered
    DuplicateEmail,

    /// Username already taken
    DuplicateUsername,
}

impl ErrorCode {
    /// Every code, in declaration order.
    pub const ALL: [ErrorCode; 10] = [
        Self::InternalError,
        Self::ValidationError,
        Self::Unauthorized,
        Self::ForbiddenOperation,
        Self::InvalidCredentials,
        Self::EntityNotFound,
        Self::UserNotFound,
        Self::Conflict,
        Self::DuplicateEmail,
        Self::DuplicateUsername,
    ];

    /// Wire name of the code (e.g. `DUPLICATE_EMAIL`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InternalError => "INTERNAL_ERROR",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::ForbiddenOperation => "FORBIDDEN_OPERATION",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::EntityNotFound => "ENTITY_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
            Self::DuplicateUsername => "DUPLICATE_USERNAME",
        }
    }

    /// Human-readable message used when an exception is raised without one
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::InternalError => "An unexpected error occurred",
            Self::ValidationError => "Validation failed",
            Self::Unauthorized => "Authentication required",
            Self::ForbiddenOperation => "You do not have permission to perform this action",
            Self::InvalidCredentials => "Invalid credentials",
            Self::EntityNotFound => "The requested resource was not found",
            Self::UserNotFound => "User not found",
            Self::Conflict => "Resource conflict",
            Self::DuplicateEmail => "A user with this email already exists",
            Self::DuplicateUsername => "A user with this username already exists",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_has_a_default_message() {
        for code in ErrorCode::ALL {
            assert!(!code.default_message().is_empty(), "{code} has no message");
        }
    }

    #[test]
    fn test_display_matches_serde_name() {
        for code in ErrorCode::ALL {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code));
        }
    }

    #[test]
    fn test_known_messages() {
        assert_eq!(ErrorCode::ValidationError.default_message(), "Validation failed");
        assert_eq!(
            ErrorCode::DuplicateEmail.default_message(),
            "A user with this email already exists"
        );
        assert_eq!(ErrorCode::Conflict.default_message(), "Resource conflict");
    }

    #[test]
    fn test_roundtrip_from_wire_name() {
        let code: ErrorCode = serde_json::from_str("\"FORBIDDEN_OPERATION\"").unwrap();
        assert_eq!(code, ErrorCode::ForbiddenOperation);
    }
}
