//! Metrics hooks for filter operations
//!
//! Provides instrumentation points for monitoring filter traffic, resource
//! usage and operation latencies.
//!
//! ## Usage
//!
//! ```
//! use bloom_engine::metrics::Metrics;
//! use std::time::Duration;
//!
//! let metrics = Metrics::new();
//! metrics.record_filter_created(9586, 7, 1000);
//! metrics.record_lookup(Duration::from_nanos(120), true);
//! assert_eq!(metrics.snapshot().lookups_performed, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

/// Metrics collector for filter operations
///
/// Thread-safe counters for monitoring filter performance.
#[derive(Default)]
pub struct Metrics {
    /// Total filters created (initial filter plus every rebuild)
    pub filters_created: AtomicU64,
    /// Total elements inserted across all filters
    pub elements_inserted: AtomicU64,
    /// Total lookups performed
    pub lookups_performed: AtomicU64,
    /// Total positive lookups (matches)
    pub lookups_positive: AtomicU64,
    /// Total successful reconfigurations
    pub reconfigurations: AtomicU64,
    /// Total requests rejected for bad input
    pub requests_rejected: AtomicU64,
    /// Bytes currently allocated for live filter bits
    pub bytes_allocated: AtomicU64,
    /// Cumulative lookup time in nanoseconds
    pub lookup_time_ns: AtomicU64,
    /// Cumulative insert time in nanoseconds
    pub insert_time_ns: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record filter creation
    pub fn record_filter_created(&self, size_bits: usize, _hash_count: usize, _capacity: usize) {
        self.filters_created.fetch_add(1, Ordering::Relaxed);
        self.bytes_allocated
            .fetch_add(size_bits.div_ceil(8) as u64, Ordering::Relaxed);
    }

    /// Record element insertion
    pub fn record_insert(&self, duration: Duration) {
        self.elements_inserted.fetch_add(1, Ordering::Relaxed);
        self.insert_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Record lookup operation
    ///
    /// `found` includes false positives.
    pub fn record_lookup(&self, duration: Duration, found: bool) {
        self.lookups_performed.fetch_add(1, Ordering::Relaxed);
        self.lookup_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        if found {
            self.lookups_positive.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a filter swap
    pub fn record_reconfigure(&self) {
        self.reconfigurations.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a rejected request
    pub fn record_rejected(&self) {
        self.requests_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record filter deallocation
    pub fn record_filter_freed(&self, size_bits: usize) {
        self.bytes_allocated
            .fetch_sub(size_bits.div_ceil(8) as u64, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            filters_created: self.filters_created.load(Ordering::Relaxed),
            elements_inserted: self.elements_inserted.load(Ordering::Relaxed),
            lookups_performed: self.lookups_performed.load(Ordering::Relaxed),
            lookups_positive: self.lookups_positive.load(Ordering::Relaxed),
            reconfigurations: self.reconfigurations.load(Ordering::Relaxed),
            requests_rejected: self.requests_rejected.load(Ordering::Relaxed),
            bytes_allocated: self.bytes_allocated.load(Ordering::Relaxed),
            avg_lookup_ns: self.avg_lookup_time_ns(),
            avg_insert_ns: self.avg_insert_time_ns(),
        }
    }

    /// Calculate average lookup time in nanoseconds
    pub fn avg_lookup_time_ns(&self) -> u64 {
        let total = self.lookup_time_ns.load(Ordering::Relaxed);
        let count = self.lookups_performed.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Calculate average insert time in nanoseconds
    pub fn avg_insert_time_ns(&self) -> u64 {
        let total = self.insert_time_ns.load(Ordering::Relaxed);
        let count = self.elements_inserted.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Ratio of positive lookups to total lookups
    pub fn observed_positive_rate(&self) -> f64 {
        let total = self.lookups_performed.load(Ordering::Relaxed);
        let positive = self.lookups_positive.load(Ordering::Relaxed);
        if total > 0 {
            positive as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub filters_created: u64,
    pub elements_inserted: u64,
    pub lookups_performed: u64,
    pub lookups_positive: u64,
    pub reconfigurations: u64,
    pub requests_rejected: u64,
    pub bytes_allocated: u64,
    pub avg_lookup_ns: u64,
    pub avg_insert_ns: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this trait to integrate with an external metrics system.
pub trait MetricsRecorder: Send + Sync {
    /// Record filter creation
    fn record_filter_created(&self, size_bits: usize, hash_count: usize, capacity: usize);

    /// Record element insertion
    fn record_insert(&self, duration: Duration);

    /// Record lookup operation
    fn record_lookup(&self, duration: Duration, found: bool);

    /// Record a filter swap
    fn record_reconfigure(&self);

    /// Record a rejected request
    fn record_rejected(&self);

    /// Record filter deallocation
    fn record_filter_freed(&self, size_bits: usize);

    /// Current counters, if this recorder keeps any
    fn snapshot(&self) -> Option<MetricsSnapshot> {
        None
    }
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_filter_created(&self, _: usize, _: usize, _: usize) {}
    fn record_insert(&self, _: Duration) {}
    fn record_lookup(&self, _: Duration, _: bool) {}
    fn record_reconfigure(&self) {}
    fn record_rejected(&self) {}
    fn record_filter_freed(&self, _: usize) {}
}

impl MetricsRecorder for Metrics {
    fn record_filter_created(&self, size_bits: usize, hash_count: usize, capacity: usize) {
        Metrics::record_filter_created(self, size_bits, hash_count, capacity);
    }

    fn record_insert(&self, duration: Duration) {
        Metrics::record_insert(self, duration);
    }

    fn record_lookup(&self, duration: Duration, found: bool) {
        Metrics::record_lookup(self, duration, found);
    }

    fn record_reconfigure(&self) {
        Metrics::record_reconfigure(self);
    }

    fn record_rejected(&self) {
        Metrics::record_rejected(self);
    }

    fn record_filter_freed(&self, size_bits: usize) {
        Metrics::record_filter_freed(self, size_bits);
    }

    fn snapshot(&self) -> Option<MetricsSnapshot> {
        Some(Metrics::snapshot(self))
    }
}
