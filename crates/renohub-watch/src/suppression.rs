//! Suppression of self-initiated removal notifications.
//!
//! When the observing user revokes somebody's access from their own
//! device, or walks away from a project shared with them, the store still
//! re-publishes the snapshot and the differ still reports a removal. The
//! UI marks the owner here just before issuing the write, and the watcher
//! drops removal notifications for marked owners until the entry expires.
//!
//! Entries expire lazily on read against a short TTL rather than via
//! spawned timers, so a torn-down session can never leave a timer behind.
//! Uses [`tokio::time::Instant`] so expiry is driven by the runtime clock.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use renohub_core::types::id::UserId;
use tokio::time::Instant;
use tracing::debug;

/// Registry of owners whose upcoming removals must stay silent.
///
/// Keyed by the owner of the affected projects: a self-revoke marks the
/// observer themselves, a self-leave marks the owner of the projects being
/// left. Consecutive marks for the same owner refresh the expiry.
#[derive(Debug)]
pub struct SuppressionRegistry {
    ttl: Duration,
    marked_at: Mutex<HashMap<UserId, Instant>>,
}

impl SuppressionRegistry {
    /// Create a registry whose entries expire `ttl_ms` after marking.
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            ttl: Duration::from_millis(ttl_ms),
            marked_at: Mutex::new(HashMap::new()),
        }
    }

    /// Mark removals of projects owned by `owner` as self-initiated.
    pub fn suppress(&self, owner: UserId) {
        let mut map = self.marked_at.lock().unwrap_or_else(|e| e.into_inner());
        map.insert(owner, Instant::now());
        debug!(%owner, ttl_ms = self.ttl.as_millis() as u64, "removal suppression marked");
    }

    /// Check whether removals owned by `owner` are currently suppressed.
    ///
    /// Expired entries are purged as they are seen, so an entry never
    /// outlives its TTL observably.
    pub fn is_suppressed(&self, owner: UserId) -> bool {
        let mut map = self.marked_at.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();

        match map.get(&owner) {
            Some(marked) if now.duration_since(*marked) < self.ttl => true,
            Some(_) => {
                map.remove(&owner);
                false
            }
            None => false,
        }
    }

    /// Drop one entry, or every entry when `owner` is `None`.
    ///
    /// Called with `None` on session teardown so a new user's session
    /// starts with no inherited suppressions.
    pub fn clear(&self, owner: Option<UserId>) {
        let mut map = self.marked_at.lock().unwrap_or_else(|e| e.into_inner());
        match owner {
            Some(owner) => {
                map.remove(&owner);
            }
            None => map.clear(),
        }
    }

    /// Purge every expired entry.
    pub fn cleanup(&self) {
        let mut map = self.marked_at.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        map.retain(|_, marked| now.duration_since(*marked) < self.ttl);
    }

    /// Number of live (unexpired) entries.
    pub fn active_count(&self) -> usize {
        self.cleanup();
        self.marked_at
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}
