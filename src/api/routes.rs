use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::envelope::{error_boundary, panic_response, route_not_found};
use super::handlers::{health_check, metrics, register, AppState};
use super::middleware::logging_middleware;
use super::openapi::ApiDoc;
use crate::metrics::middleware::track_metrics;

pub fn create_router(state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let error_sink = state.error_sink.clone();

    let api = Router::new().route("/auth/register", post(register));
    let api = match state.route_prefix.as_deref() {
        Some(prefix) => Router::new().nest(prefix, api),
        None => api,
    };

    Router::new()
        // Health check stays outside the global prefix
        .route("/health-check", get(health_check))
        .merge(api)
        // Metrics endpoint (Prometheus)
        .route("/metrics", get(metrics))
        // OpenAPI documentation
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(route_not_found)
        // Order matters: panics are caught innermost so the error boundary sees them
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(error_sink, error_boundary))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(track_metrics))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // Add shared state
        .with_state(state)
}
