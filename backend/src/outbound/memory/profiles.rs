//! In-memory `ProfileRepository` adapter.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::UserId;
use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::profiles::Profile;

/// Profiles keyed by user id, held in process memory.
#[derive(Debug, Default)]
pub struct MemoryProfileRepository {
    rows: RwLock<HashMap<UserId, Profile>>,
}

impl MemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for MemoryProfileRepository {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        Ok(self.rows.read().await.get(user_id).cloned())
    }

    async fn save(&self, profile: &Profile) -> Result<Profile, ProfileRepositoryError> {
        self.rows
            .write()
            .await
            .insert(profile.user_id.clone(), profile.clone());
        Ok(profile.clone())
    }
}
