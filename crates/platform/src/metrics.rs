//! Prometheus instruments for the vote pipeline.

use lazy_static::lazy_static;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

lazy_static! {
    pub static ref VOTE_REQUESTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "vote_requests_total",
            "Vote submissions received, labeled by outcome"
        ),
        &["outcome"]
    )
    .expect("metric can not be created");
    pub static ref VOTE_PROCESSED_TOTAL: IntCounter = IntCounter::new(
        "vote_processed_total",
        "Votes drained from the queue and persisted by the worker"
    )
    .expect("metric can not be created");
    pub static ref VOTE_PROCESSING_DURATION: Histogram = Histogram::with_opts(HistogramOpts::new(
        "vote_processing_duration_seconds",
        "Time to process one vote in the worker"
    ))
    .expect("metric can not be created");
    pub static ref REGISTRY: Registry = {
        let registry = Registry::new();
        registry
            .register(Box::new(VOTE_REQUESTS_TOTAL.clone()))
            .expect("collector can be registered");
        registry
            .register(Box::new(VOTE_PROCESSED_TOTAL.clone()))
            .expect("collector can be registered");
        registry
            .register(Box::new(VOTE_PROCESSING_DURATION.clone()))
            .expect("collector can be registered");
        registry
    };
}

pub fn observe_vote_request(outcome: &str) {
    VOTE_REQUESTS_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn inc_vote_processed() {
    VOTE_PROCESSED_TOTAL.inc();
}

pub fn observe_processing_duration(seconds: f64) {
    VOTE_PROCESSING_DURATION.observe(seconds);
}

/// Render the registry in the Prometheus text exposition format.
pub fn render() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    if let Err(err) = encoder.encode(&REGISTRY.gather(), &mut buffer) {
        tracing::error!(error = %err, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contains_registered_instruments() {
        observe_vote_request("accepted");
        inc_vote_processed();
        observe_processing_duration(0.002);

        let output = render();
        assert!(output.contains("vote_requests_total"));
        assert!(output.contains("vote_processed_total"));
        assert!(output.contains("vote_processing_duration_seconds"));
    }

    #[test]
    fn test_outcome_labels_accumulate() {
        let before = VOTE_REQUESTS_TOTAL.with_label_values(&["rate_limited"]).get();
        observe_vote_request("rate_limited");
        let after = VOTE_REQUESTS_TOTAL.with_label_values(&["rate_limited"]).get();
        assert_eq!(after, before + 1);
    }
}
