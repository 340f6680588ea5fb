//! Atomic counters for engine observability.
//!
//! All counters use relaxed ordering. They are diagnostic only and never
//! used for synchronization.

use std::sync::atomic::{AtomicU64, Ordering};

/// Formatting engine operation counters.
pub struct FormatMetrics {
    /// Formatting calls started.
    pub calls: AtomicU64,
    /// Bytes handed to destinations by successful flushes.
    pub bytes_flushed: AtomicU64,
    /// Recognized directives dispatched to a handler.
    pub directives: AtomicU64,
    /// `%%` escapes emitted.
    pub escapes: AtomicU64,
    /// Unrecognized directives (emitted as `%` or rejected under strict policy).
    pub unknown_directives: AtomicU64,
    /// Buffer creation or growth failures.
    pub allocation_failures: AtomicU64,
    /// Missing or mismatched arguments.
    pub argument_errors: AtomicU64,
    /// Failed bulk writes to a destination.
    pub write_failures: AtomicU64,
}

impl FormatMetrics {
    /// Create a new zeroed metrics instance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            calls: AtomicU64::new(0),
            bytes_flushed: AtomicU64::new(0),
            directives: AtomicU64::new(0),
            escapes: AtomicU64::new(0),
            unknown_directives: AtomicU64::new(0),
            allocation_failures: AtomicU64::new(0),
            argument_errors: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
        }
    }

    /// Increment a counter by 1.
    pub fn inc(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment a counter by `n`.
    pub fn add(counter: &AtomicU64, n: u64) {
        counter.fetch_add(n, Ordering::Relaxed);
    }

    /// Read a counter value.
    pub fn get(counter: &AtomicU64) -> u64 {
        counter.load(Ordering::Relaxed)
    }

    /// Snapshot all counters.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            calls: Self::get(&self.calls),
            bytes_flushed: Self::get(&self.bytes_flushed),
            directives: Self::get(&self.directives),
            escapes: Self::get(&self.escapes),
            unknown_directives: Self::get(&self.unknown_directives),
            allocation_failures: Self::get(&self.allocation_failures),
            argument_errors: Self::get(&self.argument_errors),
            write_failures: Self::get(&self.write_failures),
        }
    }
}

impl Default for FormatMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time snapshot of all counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    pub calls: u64,
    pub bytes_flushed: u64,
    pub directives: u64,
    pub escapes: u64,
    pub unknown_directives: u64,
    pub allocation_failures: u64,
    pub argument_errors: u64,
    pub write_failures: u64,
}

/// Global metrics instance.
static GLOBAL_METRICS: FormatMetrics = FormatMetrics::new();

/// Access the global metrics singleton.
#[must_use]
pub fn global_metrics() -> &'static FormatMetrics {
    &GLOBAL_METRICS
}
