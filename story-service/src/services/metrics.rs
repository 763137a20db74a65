//! Prometheus metrics for story-service.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

// Global registry
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

// HTTP metrics
pub static HTTP_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static HTTP_REQUEST_DURATION_SECONDS: OnceLock<HistogramVec> = OnceLock::new();

// Story metrics
pub static STORY_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static STORY_SUMMARIES_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static GENERATOR_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
pub static GENERATOR_ERRORS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Safe to call more than once; later calls are no-ops.
pub fn init_metrics() {
    if REGISTRY.get().is_some() {
        return;
    }

    let registry = Registry::new();

    let http_requests_total = IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests"),
        &["method", "path", "status"],
    )
    .expect("Failed to create http_requests_total metric");

    let http_request_duration = HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["method", "path"],
    )
    .expect("Failed to create http_request_duration_seconds metric");

    // mode: single, combined; outcome: ok or an error kind
    let story_requests = IntCounterVec::new(
        Opts::new("story_requests_total", "Total summary generation requests"),
        &["mode", "outcome"],
    )
    .expect("Failed to create story_requests_total metric");

    let story_summaries = IntCounterVec::new(
        Opts::new("story_summaries_total", "Total summaries returned"),
        &["mode"],
    )
    .expect("Failed to create story_summaries_total metric");

    let generator_latency = HistogramVec::new(
        HistogramOpts::new(
            "story_generator_latency_seconds",
            "Text generator latency in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["generator", "model"],
    )
    .expect("Failed to create story_generator_latency_seconds metric");

    let generator_errors = IntCounterVec::new(
        Opts::new("story_generator_errors_total", "Total text generator errors"),
        &["generator", "error_type"],
    )
    .expect("Failed to create story_generator_errors_total metric");

    registry
        .register(Box::new(http_requests_total.clone()))
        .expect("Failed to register http_requests_total");
    registry
        .register(Box::new(http_request_duration.clone()))
        .expect("Failed to register http_request_duration_seconds");
    registry
        .register(Box::new(story_requests.clone()))
        .expect("Failed to register story_requests_total");
    registry
        .register(Box::new(story_summaries.clone()))
        .expect("Failed to register story_summaries_total");
    registry
        .register(Box::new(generator_latency.clone()))
        .expect("Failed to register story_generator_latency_seconds");
    registry
        .register(Box::new(generator_errors.clone()))
        .expect("Failed to register story_generator_errors_total");

    let _ = REGISTRY.set(registry);
    let _ = HTTP_REQUESTS_TOTAL.set(http_requests_total);
    let _ = HTTP_REQUEST_DURATION_SECONDS.set(http_request_duration);
    let _ = STORY_REQUESTS_TOTAL.set(story_requests);
    let _ = STORY_SUMMARIES_TOTAL.set(story_summaries);
    let _ = GENERATOR_LATENCY_SECONDS.set(generator_latency);
    let _ = GENERATOR_ERRORS_TOTAL.set(generator_errors);

    tracing::info!("Prometheus metrics initialized");
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    let registry = match REGISTRY.get() {
        Some(r) => r,
        None => {
            tracing::error!("Metrics registry not initialized");
            return "# Metrics registry not initialized\n".to_string();
        }
    };

    let metric_families = registry.gather();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return format!("# Failed to encode metrics: {}\n", e);
    }

    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
            format!("# Failed to convert metrics to UTF-8: {}\n", e)
        }
    }
}

// Helper functions for recording metrics

/// Record a completed HTTP request.
pub fn record_http_request(method: &str, path: &str, status: &str, duration_secs: f64) {
    if let Some(counter) = HTTP_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[method, path, status]).inc();
    }
    if let Some(histogram) = HTTP_REQUEST_DURATION_SECONDS.get() {
        histogram
            .with_label_values(&[method, path])
            .observe(duration_secs);
    }
}

/// Record the outcome of a summary request.
pub fn record_story_request(mode: &str, outcome: &str, summaries: usize) {
    if let Some(counter) = STORY_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[mode, outcome]).inc();
    }
    if let Some(counter) = STORY_SUMMARIES_TOTAL.get() {
        counter.with_label_values(&[mode]).inc_by(summaries as u64);
    }
}

/// Record generator latency.
pub fn record_generator_latency(generator: &str, model: &str, duration_secs: f64) {
    if let Some(histogram) = GENERATOR_LATENCY_SECONDS.get() {
        histogram
            .with_label_values(&[generator, model])
            .observe(duration_secs);
    }
}

/// Record a generator error.
pub fn record_generator_error(generator: &str, error_type: &str) {
    if let Some(counter) = GENERATOR_ERRORS_TOTAL.get() {
        counter.with_label_values(&[generator, error_type]).inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposes_recorded_story_metrics() {
        init_metrics();
        record_story_request("single", "ok", 2);
        record_generator_latency("mock", "gpt2", 0.2);

        let text = get_metrics();
        assert!(text.contains("story_requests_total"));
        assert!(text.contains("story_summaries_total"));
        assert!(text.contains("story_generator_latency_seconds"));
    }
}
