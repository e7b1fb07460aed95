use axum::http::StatusCode;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::classify::ErrorResponsePayload;
use super::codes::ErrorCode;
use super::details::ViolationDetails;

/// Message used for successful responses that do not provide their own
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Operation successful";

/// What a handler hands back on success.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    /// The value becomes `data` as-is
    Plain(T),
    /// Custom envelope message with an optional result
    Described {
        message: Option<String>,
        result: Option<T>,
    },
}

impl<T> Reply<T> {
    /// A message with no data
    pub fn message(message: impl Into<String>) -> Self {
        Self::Described {
            message: Some(message.into()),
            result: None,
        }
    }

    pub fn with_result(message: impl Into<String>, result: T) -> Self {
        Self::Described {
            message: Some(message.into()),
            result: Some(result),
        }
    }
}

impl<T> From<T> for Reply<T> {
    fn from(value: T) -> Self {
        Self::Plain(value)
    }
}

/// Client-facing error: structured when a code or details exist, otherwise
/// just the message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ClientError {
    Structured(ErrorDetail),
    Message(String),
}

/// Structured error details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Error code for programmatic handling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    /// Validation messages grouped by field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<ViolationDetails>,
}

/// The single response shape for every request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope<T> {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    pub data: Option<T>,
    pub error: Option<ClientError>,
    /// ISO-8601 time the envelope was built
    pub timestamp: String,
}

impl<T> ResponseEnvelope<T> {
    /// Wrap a handler's successful return value
    pub fn success(status: StatusCode, reply: Reply<T>) -> Self {
        let (message, data) = match reply {
            Reply::Plain(value) => (DEFAULT_SUCCESS_MESSAGE.to_string(), Some(value)),
            Reply::Described { message, result } => (
                message.unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string()),
                result,
            ),
        };

        Self {
            success: true,
            status_code: status.as_u16(),
            message,
            data,
            error: None,
            timestamp: now_iso8601(),
        }
    }

    /// Wrap a classified failure
    pub fn failure(payload: &ErrorResponsePayload) -> Self {
        let error = if payload.error_code.is_some() || payload.details.is_some() {
            ClientError::Structured(ErrorDetail {
                code: payload.error_code,
                details: payload.details.clone(),
            })
        } else {
            ClientError::Message(payload.message.clone())
        };

        Self {
            success: false,
            status_code: payload.status_code.as_u16(),
            message: payload.message.clone(),
            data: None,
            error: Some(error),
            timestamp: now_iso8601(),
        }
    }
}

fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
