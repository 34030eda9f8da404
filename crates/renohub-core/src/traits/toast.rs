//! Toast surface seam.

use async_trait::async_trait;

use crate::types::toast::Toast;

/// Fire-and-forget sink routing toasts to the UI notification surface.
///
/// Implementations must never fail the caller: a toast that cannot be
/// displayed is logged and dropped.
#[async_trait]
pub trait ToastSink: Send + Sync + std::fmt::Debug + 'static {
    /// Route one toast to the notification surface.
    async fn show(&self, toast: Toast);
}
