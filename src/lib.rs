// Library exports for testing
pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod mailer;
pub mod metrics;
