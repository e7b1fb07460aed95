pub mod envelope;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod validation;

pub use envelope::{ApiResult, Success};
