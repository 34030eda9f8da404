//! Domain events produced by the share watcher.
//!
//! Events are the classified output of snapshot diffing, consumed by the
//! notification presenter and available to any other interested surface.

pub mod share;

pub use share::ShareChange;
