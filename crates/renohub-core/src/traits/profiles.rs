//! User directory seam for display-name lookups.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::id::UserId;

/// Resolves user ids to display names for message formatting.
///
/// Lookups are best-effort: callers fall back to the raw identifier when
/// resolution fails or returns `None`, so a broken directory never blocks
/// a notification.
#[async_trait]
pub trait ProfileResolver: Send + Sync + std::fmt::Debug + 'static {
    /// Return the display name for `user`, or `None` when unknown.
    async fn display_name(&self, user: UserId) -> AppResult<Option<String>>;
}
