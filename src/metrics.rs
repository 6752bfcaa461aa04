//! Prometheus metrics for status traffic and request latency.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::error::ServiceError;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// Status reads counter metric name.
pub const METRIC_STATUS_READS: &str = "status_reads_total";
/// Status writes counter metric name.
pub const METRIC_STATUS_WRITES: &str = "status_writes_total";
/// Rejected status writes counter metric name.
pub const METRIC_STATUS_WRITE_REJECTIONS: &str = "status_write_rejections_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );

    describe_counter!(METRIC_STATUS_READS, "Total number of status reads");
    describe_counter!(METRIC_STATUS_WRITES, "Total number of status writes");
    describe_counter!(
        METRIC_STATUS_WRITE_REJECTIONS,
        "Total number of status writes rejected as malformed"
    );

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder.
///
/// Only one recorder can be installed per process.
pub fn install_recorder() -> Result<PrometheusHandle, ServiceError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Record HTTP request latency.
pub fn record_http_latency(start: Instant, endpoint: &'static str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => endpoint).record(latency_ms);
}

/// Increment status reads counter.
pub fn inc_status_reads() {
    counter!(METRIC_STATUS_READS).increment(1);
}

/// Increment status writes counter.
pub fn inc_status_writes() {
    counter!(METRIC_STATUS_WRITES).increment(1);
}

/// Increment rejected writes counter.
pub fn inc_status_write_rejections() {
    counter!(METRIC_STATUS_WRITE_REJECTIONS).increment(1);
}

/// RAII guard for timing a request.
/// Records into the HTTP latency histogram when dropped.
pub struct LatencyTimer {
    start: Instant,
    endpoint: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given endpoint.
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            start: Instant::now(),
            endpoint,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        record_http_latency(self.start, self.endpoint);
    }
}
