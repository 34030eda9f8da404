//! Shared type definitions: identifiers, the project entity, and toasts.

pub mod id;
pub mod project;
pub mod toast;
