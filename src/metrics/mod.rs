//! Operation Metrics Module
//!
//! Counters describing how a locked container is being used: how many mutations succeeded or
//! failed, how often a writer found the lock already held, how long operations took, and how
//! many bytes of values the container holds.
//!
//! The containers themselves never record anything; the safety wrappers in
//! [`sync`](crate::sync) feed an [`AtomicMetrics`] and expose it through
//! [`MetricsCollector`].

use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use core::time::Duration;

/// Point-in-time snapshot of a container's operation counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerformanceMetrics {
    /// Total number of recorded mutations
    pub total_operations: u64,
    /// Mutations that succeeded (value pushed, value popped, closure ran)
    pub successful_operations: u64,
    /// Mutations that were rejected or found nothing to pop
    pub failed_operations: u64,
    /// Exclusive acquisitions that had to wait for another holder
    pub contended_operations: u64,
    /// Average operation time in nanoseconds, lock wait included
    pub avg_operation_time_ns: u64,
    /// Maximum operation time in nanoseconds
    pub max_operation_time_ns: u64,
    /// Bytes of stored values after the most recent mutation
    pub memory_usage_bytes: usize,
    /// Largest value `memory_usage_bytes` has reached
    pub peak_memory_usage_bytes: usize,
}

impl PerformanceMetrics {
    /// Success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        percentage(self.successful_operations, self.total_operations)
    }

    /// Contention rate as a percentage
    pub fn contention_rate(&self) -> f64 {
        percentage(self.contended_operations, self.total_operations)
    }

    /// Failure rate as a percentage
    pub fn failure_rate(&self) -> f64 {
        percentage(self.failed_operations, self.total_operations)
    }

    /// Average operation time
    pub fn avg_operation_time(&self) -> Duration {
        Duration::from_nanos(self.avg_operation_time_ns)
    }

    /// Maximum operation time
    pub fn max_operation_time(&self) -> Duration {
        Duration::from_nanos(self.max_operation_time_ns)
    }
}

fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// Lock-free counters behind [`PerformanceMetrics`]
#[derive(Debug, Default)]
pub struct AtomicMetrics {
    total_operations: AtomicU64,
    successful_operations: AtomicU64,
    failed_operations: AtomicU64,
    contended_operations: AtomicU64,
    total_time_ns: AtomicU64,
    max_time_ns: AtomicU64,
    memory_usage: AtomicUsize,
    peak_memory_usage: AtomicUsize,
}

impl AtomicMetrics {
    /// Record a successful operation with its duration
    pub fn record_success(&self, duration: Duration) {
        self.successful_operations.fetch_add(1, Ordering::Relaxed);
        self.record_operation(duration);
    }

    /// Record a failed operation with its duration
    pub fn record_failure(&self, duration: Duration) {
        self.failed_operations.fetch_add(1, Ordering::Relaxed);
        self.record_operation(duration);
    }

    /// Record an exclusive acquisition that found the lock held
    pub fn record_contention(&self) {
        self.contended_operations.fetch_add(1, Ordering::Relaxed);
    }

    /// Update the stored-bytes gauge and its peak
    pub fn update_memory_usage(&self, usage: usize) {
        self.memory_usage.store(usage, Ordering::Relaxed);
        self.peak_memory_usage.fetch_max(usage, Ordering::Relaxed);
    }

    /// Current counters as a snapshot
    pub fn snapshot(&self) -> PerformanceMetrics {
        let total_operations = self.total_operations.load(Ordering::Relaxed);
        let total_time = self.total_time_ns.load(Ordering::Relaxed);

        PerformanceMetrics {
            total_operations,
            successful_operations: self.successful_operations.load(Ordering::Relaxed),
            failed_operations: self.failed_operations.load(Ordering::Relaxed),
            contended_operations: self.contended_operations.load(Ordering::Relaxed),
            avg_operation_time_ns: total_time.checked_div(total_operations).unwrap_or(0),
            max_operation_time_ns: self.max_time_ns.load(Ordering::Relaxed),
            memory_usage_bytes: self.memory_usage.load(Ordering::Relaxed),
            peak_memory_usage_bytes: self.peak_memory_usage.load(Ordering::Relaxed),
        }
    }

    /// Reset every counter; the stored-bytes gauge keeps reflecting the container
    pub fn reset(&self) {
        self.total_operations.store(0, Ordering::Relaxed);
        self.successful_operations.store(0, Ordering::Relaxed);
        self.failed_operations.store(0, Ordering::Relaxed);
        self.contended_operations.store(0, Ordering::Relaxed);
        self.total_time_ns.store(0, Ordering::Relaxed);
        self.max_time_ns.store(0, Ordering::Relaxed);
        let current = self.memory_usage.load(Ordering::Relaxed);
        self.peak_memory_usage.store(current, Ordering::Relaxed);
    }

    fn record_operation(&self, duration: Duration) {
        let duration_ns = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        self.total_operations.fetch_add(1, Ordering::Relaxed);
        self.total_time_ns.fetch_add(duration_ns, Ordering::Relaxed);
        self.max_time_ns.fetch_max(duration_ns, Ordering::Relaxed);
    }
}

/// Containers that report [`PerformanceMetrics`]
pub trait MetricsCollector {
    /// Current performance metrics
    fn metrics(&self) -> PerformanceMetrics;

    /// Reset all counters
    fn reset_metrics(&self);

    /// Enable or disable collection
    fn set_metrics_enabled(&self, enabled: bool);

    /// Whether collection is enabled
    fn is_metrics_enabled(&self) -> bool;
}
