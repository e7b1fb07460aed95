//! Logging capability handed to the error boundary.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{error, warn};

use super::classify::Classified;
use super::codes::ErrorCode;

/// Request facts attached to every failure log entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogContext {
    pub status_code: u16,
    pub path: String,
    pub method: String,
    pub error_code: Option<ErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,
}

/// Destination for failure logs
pub trait ErrorSink: Send + Sync {
    fn warn(&self, message: &str, context: &LogContext);

    fn error(&self, message: &str, stack: Option<&str>, context: &LogContext);
}

/// Writes failures through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorSink;

impl ErrorSink for TracingErrorSink {
    fn warn(&self, message: &str, context: &LogContext) {
        warn!(
            status = context.status_code,
            method = %context.method,
            path = %context.path,
            context = %serde_json::to_string(context).unwrap_or_default(),
            "{}",
            message
        );
    }

    fn error(&self, message: &str, stack: Option<&str>, context: &LogContext) {
        error!(
            status = context.status_code,
            method = %context.method,
            path = %context.path,
            stack = stack.unwrap_or(""),
            context = %serde_json::to_string(context).unwrap_or_default(),
            "{}",
            message
        );
    }
}

/// Log a classified failure at the severity its status calls for.
///
/// 5xx goes to `error` with the stack, 4xx to `warn`, anything lower is not
/// logged.
pub fn log_failure(sink: &dyn ErrorSink, classified: &Classified, method: &str, path: &str) {
    let payload = &classified.payload;
    let status = payload.status_code.as_u16();
    let context = LogContext {
        status_code: status,
        path: path.to_string(),
        method: method.to_string(),
        error_code: payload.error_code,
        context: classified.context.clone(),
    };
    let code = payload.error_code.map(|code| code.as_str());

    if status >= 500 {
        let message = format!("[{}] {}", code.unwrap_or("UNHANDLED"), payload.message);
        sink.error(&message, classified.stack.as_deref(), &context);
    } else if status >= 400 {
        let message = format!("[{}] {}", code.unwrap_or("HTTP_ERROR"), payload.message);
        sink.warn(&message, &context);
    }
}
