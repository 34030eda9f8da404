//! Share-related domain events.

use serde::{Deserialize, Serialize};

use crate::types::id::{ProjectId, UserId};

/// A change in the observing user's access to another user's projects,
/// classified from two consecutive snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShareChange {
    /// An owner granted the observer access to one or more projects.
    Granted {
        /// The granting owner.
        owner_id: UserId,
        /// The newly visible projects.
        project_ids: Vec<ProjectId>,
    },
    /// The observer's access to one or more of an owner's projects ended.
    Revoked {
        /// The owner whose projects disappeared.
        owner_id: UserId,
        /// The projects that went away.
        project_ids: Vec<ProjectId>,
    },
}

impl ShareChange {
    /// The owner this change concerns.
    pub fn owner_id(&self) -> UserId {
        match self {
            Self::Granted { owner_id, .. } | Self::Revoked { owner_id, .. } => *owner_id,
        }
    }

    /// Number of projects affected.
    pub fn project_count(&self) -> usize {
        match self {
            Self::Granted { project_ids, .. } | Self::Revoked { project_ids, .. } => {
                project_ids.len()
            }
        }
    }
}
