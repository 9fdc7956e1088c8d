//! Metrics collection and exposition.
//!
//! # Metrics
//! - `origin_resolutions_total` (counter): resolved requests by source, status
//! - `origin_resolution_duration_seconds` (histogram): time to a response, by source
//! - `origin_dispatch_failures_total` (counter): failed host-logic calls by reason
//! - `origin_lookup_failures_total` (counter): resource I/O faults by stage
//! - `origin_deferred_total` (counter): requests outside the reserved origin
//! - `origin_cancelled_total` (counter): resolutions stopped before completion
//!
//! Recording is a no-op until [`init_metrics`] installs the Prometheus recorder.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_resolution(source: &'static str, status: u16, start: Instant) {
    counter!("origin_resolutions_total", "source" => source, "status" => status.to_string()).increment(1);
    histogram!("origin_resolution_duration_seconds", "source" => source)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_dispatch_failure(reason: &'static str) {
    counter!("origin_dispatch_failures_total", "reason" => reason).increment(1);
}

pub fn record_lookup_failure(stage: &'static str) {
    counter!("origin_lookup_failures_total", "stage" => stage).increment(1);
}

pub fn record_deferred() {
    counter!("origin_deferred_total").increment(1);
}

pub fn record_cancelled() {
    counter!("origin_cancelled_total").increment(1);
}
