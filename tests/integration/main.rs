//! End-to-end tests for the shared-project watcher over the in-memory
//! project store.

mod helpers;

mod bootstrap_test;
mod debounce_test;
mod delivery_error_test;
mod session_test;
mod share_change_test;
