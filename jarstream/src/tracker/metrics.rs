//! Lock-free tracker instrumentation.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counters recorded by the tracker as downloads progress.
///
/// Counters are best-effort and lock-free; readers take a point-in-time
/// [`TrackerSnapshot`] rather than observing the atomics directly.
#[derive(Debug, Default)]
pub struct TrackerMetrics {
    fetches_started: AtomicU64,
    fetches_succeeded: AtomicU64,
    fetches_failed: AtomicU64,
    waits_coalesced: AtomicU64,
}

impl TrackerMetrics {
    /// Create zeroed metrics.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fetch_started(&self) {
        self.fetches_started.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn fetch_succeeded(&self) {
        self.fetches_succeeded.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn fetch_failed(&self) {
        self.fetches_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn wait_coalesced(&self) {
        self.waits_coalesced.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a point-in-time copy of all counters.
    pub fn snapshot(&self) -> TrackerSnapshot {
        TrackerSnapshot {
            fetches_started: self.fetches_started.load(Ordering::Relaxed),
            fetches_succeeded: self.fetches_succeeded.load(Ordering::Relaxed),
            fetches_failed: self.fetches_failed.load(Ordering::Relaxed),
            waits_coalesced: self.waits_coalesced.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the tracker counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackerSnapshot {
    /// Provider fetches started (one per single-flight winner).
    pub fetches_started: u64,
    /// Fetches that completed successfully.
    pub fetches_succeeded: u64,
    /// Fetches that ended in a sticky failure.
    pub fetches_failed: u64,
    /// Requests that waited on another caller's in-flight fetch instead of
    /// issuing their own.
    pub waits_coalesced: u64,
}

impl TrackerSnapshot {
    /// Fraction of requests served by piggybacking on an in-flight fetch.
    pub fn coalescing_rate(&self) -> f64 {
        let total = self.fetches_started + self.waits_coalesced;
        if total == 0 {
            0.0
        } else {
            self.waits_coalesced as f64 / total as f64
        }
    }
}

impl fmt::Display for TrackerSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} fetched ({} failed), {} coalesced",
            self.fetches_started, self.fetches_failed, self.waits_coalesced
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_counts() {
        let metrics = TrackerMetrics::new();
        metrics.fetch_started();
        metrics.fetch_succeeded();
        metrics.fetch_started();
        metrics.fetch_failed();
        metrics.wait_coalesced();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.fetches_started, 2);
        assert_eq!(snapshot.fetches_succeeded, 1);
        assert_eq!(snapshot.fetches_failed, 1);
        assert_eq!(snapshot.waits_coalesced, 1);
    }

    #[test]
    fn test_coalescing_rate_empty() {
        assert_eq!(TrackerSnapshot::default().coalescing_rate(), 0.0);
    }

    #[test]
    fn test_coalescing_rate() {
        let snapshot = TrackerSnapshot {
            fetches_started: 1,
            fetches_succeeded: 1,
            fetches_failed: 0,
            waits_coalesced: 3,
        };

        assert_eq!(snapshot.coalescing_rate(), 0.75);
    }

    #[test]
    fn test_snapshot_display() {
        let snapshot = TrackerSnapshot {
            fetches_started: 4,
            fetches_succeeded: 3,
            fetches_failed: 1,
            waits_coalesced: 2,
        };

        assert_eq!(snapshot.to_string(), "4 fetched (1 failed), 2 coalesced");
    }
}
