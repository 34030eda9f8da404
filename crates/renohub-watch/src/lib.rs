//! # renohub-watch
//!
//! Shared-project change watching for RenoHub: diffs the live snapshots
//! delivered by the project store, suppresses echoes of the user's own
//! share actions, debounces baseline commits across write bursts, and
//! presents the surviving changes as localized toasts.
//!
//! ## Components
//!
//! - [`diff`]: pure snapshot-to-snapshot comparison
//! - [`suppression`]: TTL'd registry silencing self-initiated removals
//! - [`debounce`]: debounced promotion of snapshots to comparison baseline
//! - [`presenter`] and [`plural`]: localized, count-aware toast wording
//! - [`watcher`]: the session-scoped loop tying the pieces to a
//!   [`renohub_core::traits::source::ProjectSource`] subscription
//! - [`source`]: in-memory store implementation for demos and tests

pub mod debounce;
pub mod diff;
pub mod metrics;
pub mod plural;
pub mod presenter;
pub mod profiles;
pub mod source;
pub mod suppression;
pub mod toast;
pub mod watcher;

pub use debounce::BaselineCommitter;
pub use diff::{SnapshotDiff, diff_snapshots};
pub use metrics::{MetricsSnapshot, WatchMetrics};
pub use plural::{Locale, PluralCategory};
pub use presenter::ToastPresenter;
pub use profiles::StaticDirectory;
pub use source::MemoryProjectStore;
pub use suppression::SuppressionRegistry;
pub use toast::{ToastBus, TracingToastSink};
pub use watcher::ShareWatcher;
