//! Debounced baseline commits.
//!
//! Batch writes in the store fan out as several full snapshots in quick
//! succession. Every snapshot is diffed immediately against the last
//! *committed* baseline, but promoting a snapshot to baseline waits out a
//! quiet window: each newer snapshot supersedes the pending commit and
//! restarts the window. A burst therefore commits exactly once, after it
//! settles, and mid-burst diffs report the cumulative change.
//!
//! The committer holds no timer of its own. It records the deadline and
//! the session loop drives it through [`BaselineCommitter::deadline`] and
//! [`BaselineCommitter::try_commit`], so dropping the session drops every
//! pending commit with it.

use std::time::Duration;

use renohub_core::types::project::Snapshot;
use tokio::time::Instant;
use tracing::trace;

/// Debounce state for the comparison baseline of one watch session.
#[derive(Debug)]
pub struct BaselineCommitter {
    delay: Duration,
    committed: Snapshot,
    pending: Option<PendingCommit>,
}

#[derive(Debug)]
struct PendingCommit {
    snapshot: Snapshot,
    due_at: Instant,
}

impl BaselineCommitter {
    /// Create a committer with an empty baseline and the given quiet window.
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            committed: Snapshot::new(),
            pending: None,
        }
    }

    /// The last committed baseline.
    pub fn baseline(&self) -> &Snapshot {
        &self.committed
    }

    /// Commit `snapshot` immediately, cancelling any pending commit.
    ///
    /// Used while bootstrapping, where initial snapshots seed the baseline
    /// without being diffed.
    pub fn seed(&mut self, snapshot: Snapshot) {
        self.pending = None;
        self.committed = snapshot;
    }

    /// Schedule `snapshot` to become the baseline once the quiet window
    /// passes. Replaces and re-times any commit already pending.
    pub fn schedule(&mut self, snapshot: Snapshot) {
        let due_at = Instant::now() + self.delay;
        if self.pending.is_some() {
            trace!("pending baseline commit superseded");
        }
        self.pending = Some(PendingCommit { snapshot, due_at });
    }

    /// Deadline of the pending commit, if one is scheduled.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due_at)
    }

    /// Promote the pending snapshot to baseline if its window has elapsed.
    ///
    /// Returns `true` when a commit happened. A commit whose window is
    /// still running is left in place.
    pub fn try_commit(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) if Instant::now() >= pending.due_at => {
                self.committed = pending.snapshot;
                true
            }
            other => {
                self.pending = other;
                false
            }
        }
    }

    /// Discard the baseline and any pending commit.
    pub fn reset(&mut self) {
        self.pending = None;
        self.committed = Snapshot::new();
    }
}
