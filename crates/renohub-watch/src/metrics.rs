//! Watch session metrics.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Counters for one watcher instance, shared across its sessions.
#[derive(Debug)]
pub struct WatchMetrics {
    /// Total snapshots received from the store
    pub snapshots_received: AtomicU64,
    /// Snapshots consumed as bootstrap baseline seeds
    pub bootstrap_seeded: AtomicU64,
    /// Diffs executed against the committed baseline
    pub diffs_run: AtomicU64,
    /// Toasts presented for share changes
    pub changes_presented: AtomicU64,
    /// Removals dropped because the owner was suppressed
    pub removals_suppressed: AtomicU64,
    /// Debounced baseline commits performed
    pub baseline_commits: AtomicU64,
    /// Failed snapshot deliveries
    pub delivery_errors: AtomicU64,
    /// Sessions started
    pub sessions_started: AtomicU64,
}

impl WatchMetrics {
    /// Create new zeroed metrics
    pub fn new() -> Self {
        Self {
            snapshots_received: AtomicU64::new(0),
            bootstrap_seeded: AtomicU64::new(0),
            diffs_run: AtomicU64::new(0),
            changes_presented: AtomicU64::new(0),
            removals_suppressed: AtomicU64::new(0),
            baseline_commits: AtomicU64::new(0),
            delivery_errors: AtomicU64::new(0),
            sessions_started: AtomicU64::new(0),
        }
    }

    pub fn record_snapshot(&self) {
        self.snapshots_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_bootstrap_seed(&self) {
        self.bootstrap_seeded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_diff(&self) {
        self.diffs_run.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_change_presented(&self) {
        self.changes_presented.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_removals_suppressed(&self, count: u64) {
        self.removals_suppressed.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_baseline_commit(&self) {
        self.baseline_commits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delivery_error(&self) {
        self.delivery_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_session_started(&self) {
        self.sessions_started.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            snapshots_received: self.snapshots_received.load(Ordering::Relaxed),
            bootstrap_seeded: self.bootstrap_seeded.load(Ordering::Relaxed),
            diffs_run: self.diffs_run.load(Ordering::Relaxed),
            changes_presented: self.changes_presented.load(Ordering::Relaxed),
            removals_suppressed: self.removals_suppressed.load(Ordering::Relaxed),
            baseline_commits: self.baseline_commits.load(Ordering::Relaxed),
            delivery_errors: self.delivery_errors.load(Ordering::Relaxed),
            sessions_started: self.sessions_started.load(Ordering::Relaxed),
        }
    }
}

impl Default for WatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable counter snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Total snapshots received from the store
    pub snapshots_received: u64,
    /// Snapshots consumed as bootstrap baseline seeds
    pub bootstrap_seeded: u64,
    /// Diffs executed against the committed baseline
    pub diffs_run: u64,
    /// Toasts presented for share changes
    pub changes_presented: u64,
    /// Removals dropped because the owner was suppressed
    pub removals_suppressed: u64,
    /// Debounced baseline commits performed
    pub baseline_commits: u64,
    /// Failed snapshot deliveries
    pub delivery_errors: u64,
    /// Sessions started
    pub sessions_started: u64,
}
