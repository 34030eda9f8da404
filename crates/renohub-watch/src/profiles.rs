//! In-memory user directory.

use async_trait::async_trait;
use dashmap::DashMap;
use renohub_core::result::AppResult;
use renohub_core::traits::profiles::ProfileResolver;
use renohub_core::types::id::UserId;

/// Map-backed profile resolver for demos, tests, and single-process runs.
#[derive(Debug, Default)]
pub struct StaticDirectory {
    names: DashMap<UserId, String>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a display name.
    pub fn insert(&self, user: UserId, name: impl Into<String>) {
        self.names.insert(user, name.into());
    }
}

#[async_trait]
impl ProfileResolver for StaticDirectory {
    async fn display_name(&self, user: UserId) -> AppResult<Option<String>> {
        Ok(self.names.get(&user).map(|entry| entry.value().clone()))
    }
}
