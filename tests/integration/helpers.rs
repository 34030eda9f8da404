//! Shared test helpers for integration tests.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use renohub_core::config::watch::WatchConfig;
use renohub_core::types::toast::Toast;
use renohub_watch::metrics::MetricsSnapshot;
use renohub_watch::profiles::StaticDirectory;
use renohub_watch::source::MemoryProjectStore;
use renohub_watch::toast::ToastBus;
use renohub_watch::watcher::ShareWatcher;

/// Watch rig under test: store, directory, watcher, and a captured
/// toast surface.
pub struct TestRig {
    pub store: Arc<MemoryProjectStore>,
    pub directory: Arc<StaticDirectory>,
    pub watcher: ShareWatcher,
    pub toasts: broadcast::Receiver<Toast>,
}

impl TestRig {
    /// Create a rig with the default test config.
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: WatchConfig) -> Self {
        let store = Arc::new(MemoryProjectStore::new(config.snapshot_buffer_size));
        let directory = Arc::new(StaticDirectory::new());
        let bus = Arc::new(ToastBus::new(config.toast_buffer_size));
        let toasts = bus.subscribe();
        let watcher = ShareWatcher::new(config, store.clone(), directory.clone(), bus);
        Self {
            store,
            directory,
            watcher,
            toasts,
        }
    }

    /// Poll the watcher metrics until `predicate` holds.
    ///
    /// Under a paused runtime the sleeps auto-advance, so this settles
    /// immediately once the session task has caught up.
    pub async fn wait_for(&self, predicate: impl Fn(&MetricsSnapshot) -> bool) {
        let metrics = self.watcher.metrics();
        for _ in 0..200 {
            if predicate(&metrics.snapshot()) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("condition not reached; metrics = {:?}", metrics.snapshot());
    }

    /// Let the session task finish everything already delivered to it.
    pub async fn quiesce(&self) {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    /// Take every toast currently queued on the surface.
    pub fn drain_toasts(&mut self) -> Vec<Toast> {
        let mut seen = Vec::new();
        while let Ok(toast) = self.toasts.try_recv() {
            seen.push(toast);
        }
        seen
    }
}

/// Watch config with a short debounce and TTL for fast tests.
pub fn test_config() -> WatchConfig {
    WatchConfig {
        bootstrap_snapshots: 2,
        debounce_ms: 80,
        suppression_ttl_ms: 400,
        snapshot_buffer_size: 32,
        toast_buffer_size: 64,
        locale: "en".to_string(),
    }
}
