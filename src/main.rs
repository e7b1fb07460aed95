use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use backend_starter::api::handlers::AppStateInner;
use backend_starter::api::routes::create_router;
use backend_starter::auth::AuthService;
use backend_starter::config::{Config, Environment};
use backend_starter::errors::TracingErrorSink;
use backend_starter::mailer::LogMailer;
use backend_starter::metrics;

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }

    info!("Starting graceful shutdown...");
}

/// JSON logs in production, human-readable output otherwise
fn init_logging(environment: Environment) {
    let default_filter = if environment.is_production() {
        "info"
    } else {
        "info,backend_starter=debug"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    if environment.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; it decides the log format
    let config = Config::from_env().context("Failed to load configuration")?;

    init_logging(config.environment);

    info!(
        "Starting {} v{} ({:?})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.environment
    );

    // Initialize metrics
    metrics::registry::init_metrics();
    info!("Metrics registry initialized");

    if config.mailer.is_none() {
        warn!("Mailer is not configured; mails will only be logged");
    }
    let mailer = Arc::new(LogMailer::from_config(config.mailer.as_ref()));
    let auth_service = AuthService::new(mailer, config.project_name.clone());

    let route_prefix = config.server.route_prefix();
    if let Some(prefix) = &route_prefix {
        info!("API routes mounted under {}", prefix);
    }

    // Create application state
    let state = Arc::new(AppStateInner {
        auth_service,
        error_sink: Arc::new(TracingErrorSink),
        route_prefix,
    });

    // Create router
    let app = create_router(state);

    // Start server
    let addr = config.server_address();
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind server")?;

    info!("Application is running on: http://{}", addr);

    // Serve with graceful shutdown
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    info!("Server shutdown complete");

    Ok(())
}
