//! Real-time subscription seam over the external project store.
//!
//! This is the single capability the watcher consumes from its
//! environment. The store always publishes the observer's **full visible
//! collection** on every relevant change — never a delta — so all change
//! detection happens downstream by comparing consecutive snapshots.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::DropGuard;

use crate::error::AppError;
use crate::result::AppResult;
use crate::types::id::UserId;
use crate::types::project::Project;

/// One delivery from the store's real-time subscription.
#[derive(Debug)]
pub enum SnapshotEvent {
    /// A full snapshot of every project visible to the observer.
    Snapshot(Vec<Project>),
    /// Delivery failed (e.g., a permission error). The subscription stays
    /// open; later deliveries may succeed again.
    Failed(AppError),
}

/// An open subscription: the snapshot stream plus its cancellation guard.
///
/// Dropping the subscription unsubscribes upstream; no event is observable
/// after the drop completes.
#[derive(Debug)]
pub struct ProjectSubscription {
    /// Snapshot deliveries, in emission order.
    events: mpsc::Receiver<SnapshotEvent>,
    /// Cancels the upstream registration when dropped.
    _guard: DropGuard,
}

impl ProjectSubscription {
    /// Assemble a subscription from its delivery channel and guard.
    pub fn new(events: mpsc::Receiver<SnapshotEvent>, guard: DropGuard) -> Self {
        Self {
            events,
            _guard: guard,
        }
    }

    /// Receive the next delivery, or `None` once the source hung up.
    pub async fn recv(&mut self) -> Option<SnapshotEvent> {
        self.events.recv().await
    }
}

/// Pluggable source of real-time project snapshots.
#[async_trait]
pub trait ProjectSource: Send + Sync + std::fmt::Debug + 'static {
    /// Open a subscription covering everything `observer` can see.
    ///
    /// Implementations must deliver at least one initial snapshot promptly
    /// after subscribing, and a full snapshot (never a delta) whenever any
    /// visible project changes.
    async fn subscribe(&self, observer: UserId) -> AppResult<ProjectSubscription>;
}
