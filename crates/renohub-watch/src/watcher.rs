//! Shared-project change watcher.
//!
//! One [`ShareWatcher`] serves the whole app. `start` opens a store
//! subscription for the observing user and spawns a session task that
//! owns every piece of per-session state: the committed baseline, the
//! bootstrap countdown, the pending debounced commit, and the error
//! latch. `stop` cancels the task and clears suppressions before it
//! returns, so nothing can leak into the next user's session.
//!
//! Inside a session each delivered snapshot is diffed immediately
//! against the last committed baseline, classified per owner, filtered
//! through the suppression registry, and presented. Committing the
//! snapshot as the new baseline is debounced, which folds write bursts
//! into one commit while mid-burst diffs report cumulative counts.

use std::collections::HashMap;
use std::sync::Arc;

use renohub_core::config::watch::WatchConfig;
use renohub_core::events::ShareChange;
use renohub_core::result::AppResult;
use renohub_core::traits::profiles::ProfileResolver;
use renohub_core::traits::source::{ProjectSource, ProjectSubscription, SnapshotEvent};
use renohub_core::traits::toast::ToastSink;
use renohub_core::types::id::{ProjectId, UserId};
use renohub_core::types::project::{Project, keyed};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::debounce::BaselineCommitter;
use crate::diff::{SnapshotDiff, diff_snapshots};
use crate::metrics::WatchMetrics;
use crate::plural::Locale;
use crate::presenter::ToastPresenter;
use crate::suppression::SuppressionRegistry;

/// Watches one observing user's shared projects and raises toasts when
/// access is granted or revoked.
#[derive(Debug)]
pub struct ShareWatcher {
    config: WatchConfig,
    source: Arc<dyn ProjectSource>,
    suppressions: Arc<SuppressionRegistry>,
    presenter: Arc<ToastPresenter>,
    metrics: Arc<WatchMetrics>,
    session: Mutex<Option<Session>>,
}

#[derive(Debug)]
struct Session {
    observer: UserId,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl ShareWatcher {
    pub fn new(
        config: WatchConfig,
        source: Arc<dyn ProjectSource>,
        profiles: Arc<dyn ProfileResolver>,
        sink: Arc<dyn ToastSink>,
    ) -> Self {
        let locale = Locale::parse(&config.locale);
        let presenter = Arc::new(ToastPresenter::new(locale, profiles, sink));
        let suppressions = Arc::new(SuppressionRegistry::new(config.suppression_ttl_ms));
        Self {
            config,
            source,
            suppressions,
            presenter,
            metrics: Arc::new(WatchMetrics::new()),
            session: Mutex::new(None),
        }
    }

    /// Counters shared by every session of this watcher.
    pub fn metrics(&self) -> Arc<WatchMetrics> {
        self.metrics.clone()
    }

    /// The user currently being watched, if a session is active.
    pub async fn observer(&self) -> Option<UserId> {
        self.session.lock().await.as_ref().map(|s| s.observer)
    }

    /// Mark an upcoming self-initiated revoke. Removals of projects owned
    /// by `owner` stay silent until the mark expires; UI handlers call
    /// this immediately before issuing the write.
    pub fn mark_self_revoke(&self, owner: UserId) {
        debug!(%owner, "marking self-initiated revoke");
        self.suppressions.suppress(owner);
    }

    /// Mark an upcoming self-initiated leave of `owner`'s shared projects.
    /// Routes through the same registry as [`ShareWatcher::mark_self_revoke`].
    pub fn mark_self_leave(&self, owner: UserId) {
        debug!(%owner, "marking self-initiated leave");
        self.suppressions.suppress(owner);
    }

    /// Start watching on behalf of `observer`.
    ///
    /// Any previous session is stopped first, so switching users can
    /// never diff one user's snapshot against another's baseline.
    pub async fn start(&self, observer: UserId) -> AppResult<()> {
        self.stop().await;

        let subscription = self.source.subscribe(observer).await?;
        let state = SessionState::new(
            observer,
            &self.config,
            self.suppressions.clone(),
            self.metrics.clone(),
        );
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_session(
            state,
            subscription,
            self.presenter.clone(),
            cancel.clone(),
        ));

        *self.session.lock().await = Some(Session {
            observer,
            cancel,
            task,
        });
        self.metrics.record_session_started();
        info!(
            %observer,
            bootstrap_snapshots = self.config.bootstrap_snapshots,
            debounce_ms = self.config.debounce_ms,
            "share watch started"
        );
        Ok(())
    }

    /// Stop the active session, if any.
    ///
    /// Awaits the session task, which drops the subscription, the
    /// baseline, and any pending baseline commit, then clears every
    /// suppression entry. After this returns no stale timer or state can
    /// touch a later session.
    pub async fn stop(&self) {
        let previous = self.session.lock().await.take();
        if let Some(session) = previous {
            session.cancel.cancel();
            if let Err(error) = session.task.await {
                if error.is_panic() {
                    warn!(observer = %session.observer, "session task panicked during shutdown");
                }
            }
            self.suppressions.clear(None);
            info!(observer = %session.observer, "share watch stopped");
        }
    }
}

/// Per-session state, owned by the session task.
///
/// Factored apart from the delivery loop so snapshot handling can be
/// driven directly in tests.
#[derive(Debug)]
struct SessionState {
    observer: UserId,
    committer: BaselineCommitter,
    bootstrap_remaining: u32,
    delivery_failed: bool,
    suppressions: Arc<SuppressionRegistry>,
    metrics: Arc<WatchMetrics>,
}

impl SessionState {
    fn new(
        observer: UserId,
        config: &WatchConfig,
        suppressions: Arc<SuppressionRegistry>,
        metrics: Arc<WatchMetrics>,
    ) -> Self {
        Self {
            observer,
            committer: BaselineCommitter::new(config.debounce_ms),
            bootstrap_remaining: config.bootstrap_snapshots,
            delivery_failed: false,
            suppressions,
            metrics,
        }
    }

    /// Handle one delivered snapshot, returning the changes to present.
    ///
    /// Bootstrap snapshots only seed the baseline. Afterwards every
    /// snapshot is diffed against the last committed baseline and then
    /// scheduled as the next baseline through the debounce window.
    fn on_snapshot(&mut self, projects: Vec<Project>) -> Vec<ShareChange> {
        self.metrics.record_snapshot();
        self.delivery_failed = false;
        let current = keyed(projects);

        if self.bootstrap_remaining > 0 {
            self.bootstrap_remaining -= 1;
            self.metrics.record_bootstrap_seed();
            debug!(
                observer = %self.observer,
                remaining = self.bootstrap_remaining,
                "bootstrap snapshot seeded baseline"
            );
            self.committer.seed(current);
            return Vec::new();
        }

        let observer = self.observer;
        let diff = diff_snapshots(self.committer.baseline(), &current, |project| {
            !project.is_owned_by(observer)
        });
        self.metrics.record_diff();

        let changes = self.classify(diff);
        self.committer.schedule(current);
        changes
    }

    /// Group the diff per owner and drop suppressed removals.
    fn classify(&self, diff: SnapshotDiff) -> Vec<ShareChange> {
        let mut changes = Vec::new();
        for (owner_id, project_ids) in group_by_owner(diff.added) {
            changes.push(ShareChange::Granted {
                owner_id,
                project_ids,
            });
        }
        for (owner_id, project_ids) in group_by_owner(diff.removed) {
            if self.suppressions.is_suppressed(owner_id) {
                self.metrics
                    .record_removals_suppressed(project_ids.len() as u64);
                debug!(
                    owner = %owner_id,
                    count = project_ids.len(),
                    "self-initiated removal suppressed"
                );
                continue;
            }
            changes.push(ShareChange::Revoked {
                owner_id,
                project_ids,
            });
        }
        changes
    }

    /// Record a failed delivery. Returns `true` when the failure starts
    /// a new streak and should raise the error toast.
    fn on_delivery_failure(&mut self) -> bool {
        self.metrics.record_delivery_error();
        if self.delivery_failed {
            false
        } else {
            self.delivery_failed = true;
            true
        }
    }

    fn on_commit_due(&mut self) {
        if self.committer.try_commit() {
            self.metrics.record_baseline_commit();
            trace!(observer = %self.observer, "baseline committed");
        }
    }

    fn commit_deadline(&self) -> Option<Instant> {
        self.committer.deadline()
    }
}

/// One owner per change, ids grouped, owners in stable order.
fn group_by_owner(projects: Vec<Project>) -> Vec<(UserId, Vec<ProjectId>)> {
    let mut groups: HashMap<UserId, Vec<ProjectId>> = HashMap::new();
    for project in projects {
        groups.entry(project.owner_id).or_default().push(project.id);
    }
    let mut grouped: Vec<_> = groups.into_iter().collect();
    grouped.sort_by_key(|(owner, _)| owner.into_uuid());
    grouped
}

/// Session delivery loop. Exits on cancellation or when the source
/// closes the subscription.
async fn run_session(
    mut state: SessionState,
    mut subscription: ProjectSubscription,
    presenter: Arc<ToastPresenter>,
    cancel: CancellationToken,
) {
    debug!(observer = %state.observer, "session loop started");
    loop {
        let deadline = state.commit_deadline();
        tokio::select! {
            _ = cancel.cancelled() => break,
            delivery = subscription.recv() => match delivery {
                Some(SnapshotEvent::Snapshot(projects)) => {
                    let changes = state.on_snapshot(projects);
                    for change in &changes {
                        presenter.present(change).await;
                        state.metrics.record_change_presented();
                    }
                }
                Some(SnapshotEvent::Failed(error)) => {
                    warn!(observer = %state.observer, %error, "snapshot delivery failed");
                    if state.on_delivery_failure() {
                        presenter.present_delivery_error().await;
                    }
                }
                None => {
                    debug!(observer = %state.observer, "snapshot stream closed");
                    break;
                }
            },
            _ = sleep_until_deadline(deadline) => state.on_commit_due(),
        }
    }
    debug!(observer = %state.observer, "session loop ended");
}

/// Sleeps until the pending commit is due; pends forever when nothing
/// is scheduled so the select arm never fires spuriously.
async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(due) => tokio::time::sleep_until(due).await,
        None => std::future::pending().await,
    }
}
