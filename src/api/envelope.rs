//! HTTP edge of the envelope pipeline.
//!
//! Handlers return [`ApiResult`]. Successes are wrapped by [`Success`]'s
//! `IntoResponse`; failures by [`ApiError`]'s, which also leaves the
//! classification on the response for [`error_boundary`] to log.

use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, Method, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use anyhow::anyhow;
use serde::Serialize;

use crate::errors::{log_failure, ApiError, Classified, ErrorSink, Reply, ResponseEnvelope};
use crate::metrics::API_ERRORS_TOTAL;

pub type ApiResult<T> = Result<Success<T>, ApiError>;

/// A successful handler result and the status to send it with.
///
/// The status is always below 400.
#[derive(Debug, Clone, PartialEq)]
pub struct Success<T> {
    status: StatusCode,
    reply: Reply<T>,
}

impl<T> Success<T> {
    /// 200 OK
    pub fn ok(reply: Reply<T>) -> Self {
        Self {
            status: StatusCode::OK,
            reply,
        }
    }

    /// 201 Created
    pub fn created(reply: Reply<T>) -> Self {
        Self {
            status: StatusCode::CREATED,
            reply,
        }
    }

    /// Any other non-error status. Error statuses belong on [`ApiError`] and
    /// are turned into an internal error here.
    pub fn with_status(status: StatusCode, reply: Reply<T>) -> Result<Self, ApiError> {
        if is_failure(status) {
            return Err(anyhow!("Success reply built with error status {status}").into());
        }
        Ok(Self { status, reply })
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<T: Serialize> IntoResponse for Success<T> {
    fn into_response(self) -> Response {
        let body = ResponseEnvelope::success(self.status, self.reply);
        (self.status, Json(body)).into_response()
    }
}

/// Global failure handler.
///
/// Logs every classified failure through the injected sink with the request
/// method and URL (path and query). Error responses produced outside the handlers (e.g.
/// axum's 405) carry no classification and are replaced by an envelope.
pub async fn error_boundary(
    State(sink): State<Arc<dyn ErrorSink>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().to_string();

    let mut response = next.run(request).await;

    let attached = response.extensions_mut().remove::<Classified>();
    let classified = match attached {
        Some(classified) => classified,
        None if is_failure(response.status()) => {
            let (replacement, classified) = envelope_bare_error(response);
            response = replacement;
            classified
        }
        None => return response,
    };

    let payload = &classified.payload;
    API_ERRORS_TOTAL
        .with_label_values(&[
            payload.error_code.map_or("NONE", |code| code.as_str()),
            payload.status_code.as_str(),
        ])
        .inc();
    log_failure(sink.as_ref(), &classified, method.as_str(), &path);

    response
}

fn is_failure(status: StatusCode) -> bool {
    status.is_client_error() || status.is_server_error()
}

fn envelope_bare_error(original: Response) -> (Response, Classified) {
    let status = original.status();
    let message = status.canonical_reason().unwrap_or("Unknown error");
    let error = ApiError::http(status, message);
    let classified = Classified::from_error(&error);

    let mut response = error.into_response();
    response.extensions_mut().remove::<Classified>();
    if let Some(allow) = original.headers().get(header::ALLOW) {
        response.headers_mut().insert(header::ALLOW, allow.clone());
    }

    (response, classified)
}

/// Fallback for requests matching no route
pub async fn route_not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::http(
        StatusCode::NOT_FOUND,
        format!("Cannot {} {}", method, uri.path()),
    )
}

/// Turns a caught panic into an [`ApiError::Unknown`] response
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(message) = panic.downcast_ref::<String>() {
        Some(message.clone())
    } else {
        panic.downcast_ref::<&str>().map(|message| message.to_string())
    };

    ApiError::Unknown(message).into_response()
}
