//! Toast delivery sinks.
//!
//! [`ToastBus`] fans toasts out to every attached surface over a
//! broadcast channel. [`TracingToastSink`] writes them to the log, which
//! is what the demo binary uses for its "UI".

use async_trait::async_trait;
use renohub_core::traits::toast::ToastSink;
use renohub_core::types::toast::{Toast, ToastSeverity};
use tokio::sync::broadcast;
use tracing::{info, trace, warn};

/// Broadcast fan-out of toasts to any number of attached surfaces.
///
/// Toasts are transient: with no surface attached, or with a lagging
/// receiver, they are silently dropped.
#[derive(Debug)]
pub struct ToastBus {
    tx: broadcast::Sender<Toast>,
}

impl ToastBus {
    /// Create a bus that buffers up to `buffer_size` undelivered toasts
    /// per receiver.
    pub fn new(buffer_size: usize) -> Self {
        let (tx, _rx) = broadcast::channel(buffer_size);
        Self { tx }
    }

    /// Attach a new surface.
    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.tx.subscribe()
    }

    /// Number of currently attached surfaces.
    pub fn surface_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[async_trait]
impl ToastSink for ToastBus {
    async fn show(&self, toast: Toast) {
        if self.tx.send(toast).is_err() {
            trace!("no toast surface attached, dropping toast");
        }
    }
}

/// Sink that renders toasts as log lines.
#[derive(Debug, Default)]
pub struct TracingToastSink;

#[async_trait]
impl ToastSink for TracingToastSink {
    async fn show(&self, toast: Toast) {
        match toast.severity {
            ToastSeverity::Info => info!(toast_id = %toast.id, "[toast] {}", toast.body),
            ToastSeverity::Error => warn!(toast_id = %toast.id, "[toast] {}", toast.body),
        }
    }
}
