//! Renovation project entity as the external store publishes it.
//!
//! Projects are created, updated, and deleted entirely by the external
//! document store; RenoHub only observes full snapshots of the collection
//! visible to one user.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::id::{ProjectId, UserId};

/// A renovation project shared between users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier.
    pub id: ProjectId,
    /// User who created the project and controls its membership.
    pub owner_id: UserId,
    /// Users with access to the project. May include the owner; the owner
    /// is never treated as a recipient of access to their own project.
    pub member_ids: HashSet<UserId>,
    /// Human-readable project name.
    pub name: String,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Create a new project owned by `owner_id`.
    pub fn new(owner_id: UserId, name: impl Into<String>) -> Self {
        Self {
            id: ProjectId::new(),
            owner_id,
            member_ids: HashSet::new(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }

    /// Add a member and return the project, for fixture-style construction.
    pub fn with_member(mut self, user: UserId) -> Self {
        self.member_ids.insert(user);
        self
    }

    /// Whether `user` owns this project.
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner_id == user
    }

    /// Whether this project is shared *to* `user` by someone else.
    ///
    /// The owner is excluded even when listed in `member_ids`.
    pub fn is_shared_with(&self, user: UserId) -> bool {
        self.owner_id != user && self.member_ids.contains(&user)
    }

    /// Whether `user` can see this project at all (owner or member).
    pub fn is_visible_to(&self, user: UserId) -> bool {
        self.is_owned_by(user) || self.member_ids.contains(&user)
    }
}

/// The full collection visible to one observing user, keyed by project id.
pub type Snapshot = HashMap<ProjectId, Project>;

/// Build a keyed snapshot from a delivered project list.
///
/// Later entries win on duplicate ids, matching the store's
/// last-write-wins document semantics.
pub fn keyed(projects: Vec<Project>) -> Snapshot {
    projects.into_iter().map(|p| (p.id, p)).collect()
}
