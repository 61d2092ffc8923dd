//! Shared atomic counters for worker coordination
//!
//! These are the ONLY synchronization points between worker threads.
//! All other state is thread-local.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Counters shared between all query workers
///
/// Design principle: Minimize contention by using relaxed ordering
/// where possible and keeping counter operations simple (fetch_add).
pub struct StressCounters {
    /// Total queries completed (responses received)
    pub queries_finished: AtomicU64,

    /// Total errors encountered
    pub error_count: AtomicU64,

    /// Workers that entered their query loop
    pub workers_started: AtomicU64,

    /// Workers that left their query loop
    pub workers_stopped: AtomicU64,

    /// Shutdown signal
    pub shutdown: AtomicBool,
}

impl StressCounters {
    /// Create new counters initialized to zero
    pub fn new() -> Self {
        Self {
            queries_finished: AtomicU64::new(0),
            error_count: AtomicU64::new(0),
            workers_started: AtomicU64::new(0),
            workers_stopped: AtomicU64::new(0),
            shutdown: AtomicBool::new(false),
        }
    }

    /// Record one completed query
    #[inline]
    pub fn record_query(&self) {
        self.queries_finished.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an error
    #[inline]
    pub fn record_error(&self) {
        self.error_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a worker entering its query loop
    pub fn record_worker_started(&self) {
        self.workers_started.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a worker leaving its query loop
    pub fn record_worker_stopped(&self) {
        self.workers_stopped.fetch_add(1, Ordering::Relaxed);
    }

    /// Signal shutdown to all workers
    pub fn signal_shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    /// Check if shutdown has been signaled
    #[inline]
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }

    /// Get completed query count
    pub fn queries(&self) -> u64 {
        self.queries_finished.load(Ordering::Relaxed)
    }

    /// Get error count
    pub fn errors(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Get count of workers that entered their loop
    pub fn started(&self) -> u64 {
        self.workers_started.load(Ordering::Relaxed)
    }

    /// Get count of workers that left their loop
    pub fn stopped(&self) -> u64 {
        self.workers_stopped.load(Ordering::Relaxed)
    }
}

impl Default for StressCounters {
    fn default() -> Self {
        Self::new()
    }
}
