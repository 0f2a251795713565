//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): forwarded requests by method, status
//! - `gateway_request_duration_seconds` (histogram): upstream latency
//! - `gateway_static_redirects_total` (counter): static rule hits by status
//! - `gateway_language_redirects_total` (counter): locale redirects by target locale
//! - `gateway_redirect_errors_total` (counter): stage failures by kind

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "gateway_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("gateway_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_static_redirect(status: u16) {
    metrics::counter!("gateway_static_redirects_total", "status" => status.to_string()).increment(1);
}

pub fn record_language_redirect(locale: &str) {
    metrics::counter!("gateway_language_redirects_total", "locale" => locale.to_string())
        .increment(1);
}

pub fn record_redirect_error(kind: &'static str) {
    metrics::counter!("gateway_redirect_errors_total", "kind" => kind).increment(1);
}
