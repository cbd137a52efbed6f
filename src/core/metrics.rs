//! Transport metrics for observability
//!
//! Counters for monitoring a transport's health: how many entries were
//! delivered, failed, filtered out, truncated or dropped.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for transport observability
///
/// # Example
///
/// ```
/// use rust_notify_logger::TransportMetrics;
///
/// let metrics = TransportMetrics::new();
///
/// metrics.record_delivered();
/// metrics.record_failed();
///
/// assert_eq!(metrics.delivered_count(), 1);
/// assert_eq!(metrics.failed_count(), 1);
/// assert_eq!(metrics.failure_rate(), 50.0);
/// ```
#[derive(Debug, Default)]
pub struct TransportMetrics {
    /// Entries handed to the destination successfully
    delivered: AtomicU64,

    /// Entries whose delivery failed
    failed: AtomicU64,

    /// Entries rejected by the transport's filter
    filtered: AtomicU64,

    /// Entries cut down to the destination's size ceiling
    truncated: AtomicU64,

    /// Entries discarded because too many deliveries were in flight
    dropped: AtomicU64,
}

impl TransportMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            delivered: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            truncated: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn delivered_count(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_count(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn truncated_count(&self) -> u64 {
        self.truncated.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Record a successful delivery
    #[inline]
    pub fn record_delivered(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed delivery
    #[inline]
    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_filtered(&self) {
        self.filtered.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_truncated(&self) {
        self.truncated.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an entry discarded without a delivery attempt
    #[inline]
    pub fn record_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Percentage of attempted deliveries that failed
    pub fn failure_rate(&self) -> f64 {
        let failed = self.failed_count();
        let attempted = failed + self.delivered_count();

        if attempted == 0 {
            0.0
        } else {
            (failed as f64 / attempted as f64) * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.delivered.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.truncated.store(0, Ordering::Relaxed);
        self.dropped.store(0, Ordering::Relaxed);
    }
}
