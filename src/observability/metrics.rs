//! Metrics collection and exposition.
//!
//! # Metrics
//! - `keyword_lookups_total` (counter): lookups by outcome
//! - `keyword_lookup_duration_seconds` (histogram): end-to-end handler latency
//! - `upstream_requests_total` (counter): provider calls by status
//! - `upstream_request_duration_seconds` (histogram): provider latency
//!
//! Recording is a no-op until a recorder is installed.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a finished `/ranked_keywords` request.
pub fn record_lookup(outcome: &'static str, start: Instant) {
    metrics::counter!("keyword_lookups_total", "outcome" => outcome).increment(1);
    metrics::histogram!("keyword_lookup_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

/// Record one call to the provider.
pub fn record_upstream_call(status: &str, start: Instant) {
    metrics::counter!("upstream_requests_total", "status" => status.to_string()).increment(1);
    metrics::histogram!("upstream_request_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}
