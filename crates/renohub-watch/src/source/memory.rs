//! In-memory project store for demos, tests, and single-process runs.
//!
//! Mirrors the hosted document store's observable contract: every write
//! re-publishes the affected observers' full visible collection rather
//! than a delta, a burst of writes produces a burst of snapshots, and a
//! fresh subscription receives its initial state in two waves (owned
//! projects first, then owned plus shared) because the backing query is
//! evaluated clause by clause.

use std::collections::HashSet;

use async_trait::async_trait;
use dashmap::DashMap;
use renohub_core::AppError;
use renohub_core::result::AppResult;
use renohub_core::traits::source::{ProjectSource, ProjectSubscription, SnapshotEvent};
use renohub_core::types::id::{ProjectId, UserId};
use renohub_core::types::project::Project;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};
use uuid::Uuid;

/// Subscription handle id
type SubscriberId = Uuid;

#[derive(Debug)]
struct Subscriber {
    observer: UserId,
    tx: mpsc::Sender<SnapshotEvent>,
    token: CancellationToken,
}

/// Map-backed [`ProjectSource`] with live full-snapshot publication.
#[derive(Debug)]
pub struct MemoryProjectStore {
    projects: DashMap<ProjectId, Project>,
    subscribers: DashMap<SubscriberId, Subscriber>,
    /// Per-subscription delivery buffer
    buffer_size: usize,
}

impl MemoryProjectStore {
    /// Create a store whose subscriptions buffer up to `buffer_size`
    /// undelivered snapshots.
    pub fn new(buffer_size: usize) -> Self {
        Self {
            projects: DashMap::new(),
            subscribers: DashMap::new(),
            buffer_size,
        }
    }

    /// Insert or replace a project, publishing to everyone affected.
    pub async fn upsert(&self, project: Project) {
        let previous = self.projects.insert(project.id, project.clone());

        let mut affected = interested(&project);
        if let Some(previous) = previous {
            affected.extend(interested(&previous));
        }
        self.publish_to(&affected).await;
    }

    /// Delete a project, publishing to its former owner and members.
    pub async fn remove(&self, id: ProjectId) {
        if let Some((_, project)) = self.projects.remove(&id) {
            self.publish_to(&interested(&project)).await;
        }
    }

    /// Grant `member` access to every project `owner` owns.
    ///
    /// Each project is a separate write, so a multi-project grant reaches
    /// subscribers as a burst of growing snapshots.
    pub async fn grant_all(&self, owner: UserId, member: UserId) {
        for id in self.owned_ids(owner) {
            let updated = self.projects.get_mut(&id).and_then(|mut project| {
                project.member_ids.insert(member).then(|| project.clone())
            });
            if let Some(project) = updated {
                self.publish_to(&interested(&project)).await;
            }
        }
    }

    /// Revoke `member`'s access to every project `owner` owns, one write
    /// (and one published snapshot) per project.
    pub async fn revoke_all(&self, owner: UserId, member: UserId) {
        for id in self.owned_ids(owner) {
            let updated = self.projects.get_mut(&id).and_then(|mut project| {
                project.member_ids.remove(&member).then(|| project.clone())
            });
            if let Some(project) = updated {
                let mut affected = interested(&project);
                // The removed member still needs the shrunk snapshot.
                affected.insert(member);
                self.publish_to(&affected).await;
            }
        }
    }

    /// `member` walks away from every project `owner` shared with them.
    /// The writes are identical to a revoke, only the initiator differs.
    pub async fn leave_all(&self, member: UserId, owner: UserId) {
        self.revoke_all(owner, member).await;
    }

    /// Deliver a failed-snapshot event to every live subscription for
    /// `observer`, the way the store surfaces a rejected query.
    pub async fn publish_failure(&self, observer: UserId, message: impl Into<String>) {
        let message = message.into();
        let targets = self.targets_for(|sub| sub.observer == observer);
        for (id, tx) in targets {
            let event = SnapshotEvent::Failed(AppError::subscription(message.clone()));
            if tx.send(event).await.is_err() {
                self.subscribers.remove(&id);
            }
        }
    }

    /// The observer's current visible collection.
    pub fn visible_to(&self, observer: UserId) -> Vec<Project> {
        self.projects
            .iter()
            .filter(|entry| entry.value().is_visible_to(observer))
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.retain(|_, sub| !sub.token.is_cancelled());
        self.subscribers.len()
    }

    fn owned_ids(&self, owner: UserId) -> Vec<ProjectId> {
        self.projects
            .iter()
            .filter(|entry| entry.value().is_owned_by(owner))
            .map(|entry| *entry.key())
            .collect()
    }

    fn targets_for(
        &self,
        keep: impl Fn(&Subscriber) -> bool,
    ) -> Vec<(SubscriberId, mpsc::Sender<SnapshotEvent>)> {
        self.subscribers
            .iter()
            .filter(|entry| !entry.value().token.is_cancelled() && keep(entry.value()))
            .map(|entry| (*entry.key(), entry.value().tx.clone()))
            .collect()
    }

    /// Publish each affected observer's full visible set to their live
    /// subscriptions, pruning any that have gone away.
    async fn publish_to(&self, observers: &HashSet<UserId>) {
        let targets: Vec<(SubscriberId, UserId, mpsc::Sender<SnapshotEvent>)> = self
            .subscribers
            .iter()
            .filter(|entry| {
                !entry.value().token.is_cancelled() && observers.contains(&entry.value().observer)
            })
            .map(|entry| {
                (
                    *entry.key(),
                    entry.value().observer,
                    entry.value().tx.clone(),
                )
            })
            .collect();

        for (id, observer, tx) in targets {
            let visible = self.visible_to(observer);
            if tx.send(SnapshotEvent::Snapshot(visible)).await.is_err() {
                trace!(subscriber = %id, "snapshot receiver dropped, pruning");
                self.subscribers.remove(&id);
            }
        }
        self.subscribers.retain(|_, sub| !sub.token.is_cancelled());
    }
}

impl Default for MemoryProjectStore {
    fn default() -> Self {
        Self::new(64)
    }
}

/// Observers whose visible set includes this project.
fn interested(project: &Project) -> HashSet<UserId> {
    let mut observers: HashSet<UserId> = project.member_ids.iter().copied().collect();
    observers.insert(project.owner_id);
    observers
}

#[async_trait]
impl ProjectSource for MemoryProjectStore {
    async fn subscribe(&self, observer: UserId) -> AppResult<ProjectSubscription> {
        let (tx, rx) = mpsc::channel(self.buffer_size);
        let token = CancellationToken::new();

        // Initial state arrives in two waves, owned first, matching the
        // backing query's clause-by-clause emission.
        let owned: Vec<Project> = self
            .projects
            .iter()
            .filter(|entry| entry.value().is_owned_by(observer))
            .map(|entry| entry.value().clone())
            .collect();
        let visible = self.visible_to(observer);

        tx.send(SnapshotEvent::Snapshot(owned))
            .await
            .map_err(|_| AppError::subscription("subscription closed during initial emission"))?;
        tx.send(SnapshotEvent::Snapshot(visible))
            .await
            .map_err(|_| AppError::subscription("subscription closed during initial emission"))?;

        let id = Uuid::new_v4();
        self.subscribers.insert(
            id,
            Subscriber {
                observer,
                tx,
                token: token.clone(),
            },
        );
        debug!(%observer, subscriber = %id, "project subscription opened");

        Ok(ProjectSubscription::new(rx, token.drop_guard()))
    }
}
