//! Logging middleware
//!
//! Records method, path, status and latency for every HTTP request.

use std::time::Instant;
use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{info, warn, Instrument};

const SLOW_REQUEST_MS: u128 = 1000;

/// Request logging middleware, installed with `axum::middleware::from_fn`
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let span = tracing::info_span!("http_request", method = %method, path = %path);

    async move {
        let start_time = Instant::now();
        let response = next.run(request).await;
        let duration_ms = start_time.elapsed().as_millis();
        let status = response.status();

        if status.is_server_error() {
            warn!(status = status.as_u16(), duration_ms = duration_ms, "Request failed");
        } else {
            info!(status = status.as_u16(), duration_ms = duration_ms, "Request completed");
        }

        if duration_ms > SLOW_REQUEST_MS {
            warn!(duration_ms = duration_ms, "Slow request detected");
        }
        response
    }
    .instrument(span)
    .await
}
