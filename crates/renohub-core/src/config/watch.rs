//! Share-watch notifier configuration.

use serde::{Deserialize, Serialize};

/// Settings for the shared-project change watcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Number of initial snapshots to treat as bootstrap (seed the baseline,
    /// never diff). The upstream store answers a fresh subscription in two
    /// waves — "owned" projects first, then "shared" — so the default is 2.
    /// This mirrors observed upstream behavior, not a guaranteed API.
    #[serde(default = "default_bootstrap_snapshots")]
    pub bootstrap_snapshots: u32,
    /// Debounce window in milliseconds before a delivered snapshot is
    /// committed as the new comparison baseline.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Lifetime in milliseconds of a self-initiated-action suppression
    /// entry. Bounded so a suppression outlives a missing removal event
    /// only briefly.
    #[serde(default = "default_suppression_ttl_ms")]
    pub suppression_ttl_ms: u64,
    /// Bound of the per-subscription snapshot delivery channel.
    #[serde(default = "default_snapshot_buffer")]
    pub snapshot_buffer_size: usize,
    /// Buffer size of the broadcast toast bus.
    #[serde(default = "default_toast_buffer")]
    pub toast_buffer_size: usize,
    /// BCP 47-ish language tag selecting toast pluralization and wording.
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            bootstrap_snapshots: default_bootstrap_snapshots(),
            debounce_ms: default_debounce_ms(),
            suppression_ttl_ms: default_suppression_ttl_ms(),
            snapshot_buffer_size: default_snapshot_buffer(),
            toast_buffer_size: default_toast_buffer(),
            locale: default_locale(),
        }
    }
}

fn default_bootstrap_snapshots() -> u32 {
    2
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_suppression_ttl_ms() -> u64 {
    1500
}

fn default_snapshot_buffer() -> usize {
    64
}

fn default_toast_buffer() -> usize {
    256
}

fn default_locale() -> String {
    "en".to_string()
}
