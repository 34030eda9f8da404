//! Seams to the external services RenoHub runs against.
//!
//! The document store, the toast surface, and the user directory all live
//! outside this codebase; these traits are the only way the watcher talks
//! to them.

pub mod profiles;
pub mod source;
pub mod toast;

pub use profiles::ProfileResolver;
pub use source::{ProjectSource, ProjectSubscription, SnapshotEvent};
pub use toast::ToastSink;
