//! Structured error handling for API responses

pub mod api_error;
pub mod classify;
pub mod codes;
pub mod details;
pub mod exception;
pub mod response;
pub mod sink;

pub use api_error::ApiError;
pub use classify::{classify, Classified, ErrorResponsePayload};
pub use codes::ErrorCode;
pub use details::{group_violations, ViolationDetails};
pub use exception::AppException;
pub use response::{ClientError, ErrorDetail, Reply, ResponseEnvelope};
pub use sink::{log_failure, ErrorSink, LogContext, TracingErrorSink};
