//! Transient toast notifications routed to the UI surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::id::ToastId;

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastSeverity {
    /// Informational — standard share-change notifications.
    Info,
    /// Error — e.g., subscription delivery failures.
    Error,
}

impl ToastSeverity {
    /// Convert to string
    pub fn as_str(&self) -> &str {
        match self {
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

/// A transient, non-blocking notification shown to the observing user.
///
/// Delivery is fire-and-forget: a toast that cannot be displayed is
/// dropped, never an error for the producer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Toast {
    /// Unique toast identifier.
    pub id: ToastId,
    /// Severity class selecting the display surface.
    pub severity: ToastSeverity,
    /// Already-localized message body.
    pub body: String,
    /// When the toast was produced.
    pub timestamp: DateTime<Utc>,
}

impl Toast {
    /// Create an informational toast.
    pub fn info(body: impl Into<String>) -> Self {
        Self {
            id: ToastId::new(),
            severity: ToastSeverity::Info,
            body: body.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create an error toast.
    pub fn error(body: impl Into<String>) -> Self {
        Self {
            id: ToastId::new(),
            severity: ToastSeverity::Error,
            body: body.into(),
            timestamp: Utc::now(),
        }
    }
}
