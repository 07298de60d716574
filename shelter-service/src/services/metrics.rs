//! Metrics module for shelter-service.
//! Request counters and handler latency histograms in a service-owned registry.

use prometheus::{
    histogram_opts, opts, Encoder, HistogramTimer, HistogramVec, IntCounterVec, Registry,
    TextEncoder,
};
use service_core::middleware::metrics::RequestRecorder;

/// Default buckets of the reference Prometheus clients, including 0.75s.
const LATENCY_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

#[derive(Clone)]
pub struct ShelterMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration: HistogramVec,
}

impl ShelterMetrics {
    /// Build and register all collectors. Call once at startup.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            opts!("http_requests_total", "Total HTTP Requests"),
            &["method", "endpoint"],
        )?;

        let request_duration = HistogramVec::new(
            histogram_opts!(
                "http_request_duration_seconds",
                "HTTP Request Latency",
                LATENCY_BUCKETS.to_vec()
            ),
            &["endpoint"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_duration.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            request_duration,
        })
    }

    /// Start timing a handler; the duration is observed when the timer drops.
    pub fn start_timer(&self, endpoint: &str) -> HistogramTimer {
        self.request_duration
            .with_label_values(&[endpoint])
            .start_timer()
    }

    pub fn request_count(&self, method: &str, path: &str) -> u64 {
        self.requests_total.with_label_values(&[method, path]).get()
    }

    pub fn latency_sample_count(&self, endpoint: &str) -> u64 {
        self.request_duration
            .with_label_values(&[endpoint])
            .get_sample_count()
    }

    pub fn content_type(&self) -> String {
        TextEncoder::new().format_type().to_string()
    }

    /// Current state in the Prometheus text exposition format.
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();

        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buffer) {
            tracing::error!(error = %e, "Failed to encode metrics");
            return format!("# Failed to encode metrics: {}\n", e);
        }

        String::from_utf8(buffer).unwrap_or_else(|e| {
            tracing::error!(error = %e, "Metrics output was not UTF-8");
            String::new()
        })
    }
}

impl RequestRecorder for ShelterMetrics {
    fn record_request(&self, method: &str, path: &str) {
        self.requests_total.with_label_values(&[method, path]).inc();
    }
}
