//! Snapshot-to-snapshot diffing.
//!
//! The store delivers full snapshots rather than deltas, so change
//! detection is a pure set comparison between the committed baseline and
//! the snapshot that just arrived. Membership is decided by project id
//! only; edits to a project that stays visible are not share changes.

use renohub_core::types::project::{Project, Snapshot};

/// Outcome of comparing two consecutive snapshots.
///
/// `added` holds projects that became visible, `removed` those that
/// disappeared. Both sides are sorted by project id so downstream grouping
/// and tests see a stable order regardless of map iteration.
#[derive(Debug, Clone, Default)]
pub struct SnapshotDiff {
    pub added: Vec<Project>,
    pub removed: Vec<Project>,
}

impl SnapshotDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Total number of projects that changed visibility.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len()
    }
}

/// Compare `current` against `previous`, keeping only projects for which
/// `is_relevant` returns true.
///
/// The watcher passes a predicate that drops the observer's own projects,
/// since creating or deleting one's own project must never produce a
/// share notification.
pub fn diff_snapshots(
    previous: &Snapshot,
    current: &Snapshot,
    is_relevant: impl Fn(&Project) -> bool,
) -> SnapshotDiff {
    let mut diff = SnapshotDiff::default();

    for (id, project) in current {
        if !previous.contains_key(id) && is_relevant(project) {
            diff.added.push(project.clone());
        }
    }

    for (id, project) in previous {
        if !current.contains_key(id) && is_relevant(project) {
            diff.removed.push(project.clone());
        }
    }

    diff.added.sort_by_key(|p| p.id.into_uuid());
    diff.removed.sort_by_key(|p| p.id.into_uuid());
    diff
}
