//! Request metrics.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): requests by method and relayed status
//! - `proxy_request_duration_seconds` (histogram): end-to-end latency by method
//!
//! Recording is a no-op until a recorder is installed, so tests and runs
//! with metrics disabled pay nothing.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const REQUESTS_TOTAL: &str = "proxy_requests_total";
pub const REQUEST_DURATION: &str = "proxy_request_duration_seconds";

/// Install the Prometheus recorder and its scrape listener on `addr`.
/// Must be called from within the Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    metrics::describe_counter!(REQUESTS_TOTAL, "Requests handled by the proxy route");
    metrics::describe_histogram!(
        REQUEST_DURATION,
        metrics::Unit::Seconds,
        "Time from receiving a request to producing its response"
    );

    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one proxied request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    metrics::counter!(REQUESTS_TOTAL, "method" => method.to_string(), "status" => status.to_string())
        .increment(1);
    metrics::histogram!(REQUEST_DURATION, "method" => method.to_string())
        .record(start.elapsed().as_secs_f64());
}
