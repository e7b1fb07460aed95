use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::auth::{RegisterRequest, RegisteredUser};
use crate::errors::{ClientError, ErrorCode, ErrorDetail};

/// Response envelope returned by every endpoint
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeSchema {
    /// True when the request succeeded
    pub success: bool,
    /// HTTP status code, repeated in the body
    pub status_code: u16,
    /// Human-readable outcome
    pub message: String,
    /// Handler result; null on failure
    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
    /// Null on success; a message or a `{code, details}` object on failure
    pub error: Option<ClientError>,
    /// ISO-8601 time the response was built
    pub timestamp: String,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Backend Starter",
        version = "0.1.0",
        description = "Backend scaffold with health check, user registration and uniform JSON response envelopes.",
    ),
    paths(
        crate::api::handlers::health_check,
        crate::api::handlers::register,
    ),
    components(
        schemas(
            EnvelopeSchema,
            ClientError,
            ErrorDetail,
            ErrorCode,
            RegisterRequest,
            RegisteredUser,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "User registration"),
    )
)]
pub struct ApiDoc;
