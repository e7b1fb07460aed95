use axum::{
    extract::{ConnectInfo, Request},
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Middleware to log all HTTP requests and responses with structured data
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let method = request.method().to_string();
    let uri = request.uri().to_string();
    let ip = client_ip(&request);

    info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        ip = %ip,
        "→ {} {} | IP: {}",
        method,
        uri,
        ip
    );

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_millis();
    let status = response.status().as_u16();

    // Failures are reported by the error boundary; this only adds timing
    if response.status().is_server_error() {
        warn!(
            request_id = %request_id,
            status = status,
            duration_ms = %duration_ms,
            "← {} {} {} | Duration: {}ms",
            method,
            uri,
            status,
            duration_ms
        );
    } else {
        info!(
            request_id = %request_id,
            status = status,
            duration_ms = %duration_ms,
            "← {} {} {} | Duration: {}ms",
            method,
            uri,
            status,
            duration_ms
        );
    }

    response
}

/// Peer address, when the server was started with connect info
fn client_ip(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_client_ip_from_connect_info() {
        let mut request = Request::new(Body::empty());
        assert_eq!(client_ip(&request), "unknown");

        let addr: SocketAddr = "10.1.2.3:5555".parse().unwrap();
        request.extensions_mut().insert(ConnectInfo(addr));
        assert_eq!(client_ip(&request), "10.1.2.3");
    }
}
