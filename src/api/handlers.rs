use anyhow::{anyhow, Context};
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use prometheus::{Encoder, TextEncoder};
use std::sync::Arc;
use tracing::info;

use super::envelope::{ApiResult, Success};
use super::openapi::EnvelopeSchema;
use super::validation::ValidatedJson;
use crate::auth::{AuthService, RegisterRequest, RegisteredUser};
use crate::errors::{ApiError, ErrorSink, Reply};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub auth_service: AuthService,
    pub error_sink: Arc<dyn ErrorSink>,
    /// Global prefix for API routes, e.g. `/api/v1`
    pub route_prefix: Option<String>,
}

pub const HEALTHY_MESSAGE: &str = "Backend is healthy";

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health-check",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = EnvelopeSchema)
    )
)]
pub async fn health_check() -> ApiResult<()> {
    Ok(Success::ok(Reply::message(HEALTHY_MESSAGE)))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = EnvelopeSchema),
        (status = 400, description = "Validation failed or malformed body", body = EnvelopeSchema),
        (status = 500, description = "Welcome mail could not be sent", body = EnvelopeSchema)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<RegisteredUser> {
    info!("Register request: email='{}'", request.email);

    let user = state.auth_service.register(request).await?;
    Ok(Success::created(user.into()))
}

/// Prometheus scrape endpoint.
///
/// Served in the exposition format, outside the envelope. An encoding failure
/// is still reported as an enveloped 500.
pub async fn metrics() -> Result<Response, ApiError> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&prometheus::gather(), &mut buffer)
        .map_err(|e| anyhow!("Failed to encode metrics: {}", e))?;
    let body = String::from_utf8(buffer).context("Metrics output is not valid UTF-8")?;

    Ok(([(header::CONTENT_TYPE, encoder.format_type())], body).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::registry::init_metrics;
    use crate::metrics::HTTP_REQUESTS_TOTAL;

    #[tokio::test]
    async fn test_metrics_exposition() {
        init_metrics();
        HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/health-check", "200"])
            .inc();

        let response = metrics().await.unwrap();
        assert!(response.status().is_success());
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/plain"));

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("http_requests_total"));
    }
}
