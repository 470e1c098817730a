//! Metrics for the record store
//!
//! Counters are recorded through the `metrics` facade. Nothing is exported
//! unless the host installs a recorder.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use std::time::Instant;

/// Initialize metrics with descriptions
pub fn init_metrics() {
    describe_counter!("store.operations.read", "Store read operations");
    describe_counter!("store.operations.write", "Store create and update operations");
    describe_counter!("store.operations.delete", "Store delete operations");
    describe_counter!("store.operations.denied", "Operations rejected because the caller is not the creator");
    describe_gauge!("store.records.count", "Number of records held by the store");
    describe_histogram!("store.operation.duration_ms", "Store operation duration in milliseconds");
}

/// Record a counter metric
pub fn record_counter(name: &'static str, value: u64) {
    counter!(name).increment(value);
}

/// Record a gauge metric
pub fn record_gauge(name: &'static str, value: f64) {
    gauge!(name).set(value);
}

/// Timer for measuring operation duration
pub struct Timer {
    name: &'static str,
    start: Instant,
}

impl Timer {
    /// Create a new timer
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
        }
    }

    /// Stop the timer and record the duration
    pub fn stop(self) {
        let duration = self.start.elapsed();
        histogram!(self.name).record(duration.as_secs_f64() * 1000.0);
    }
}
