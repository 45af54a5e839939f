//! In-memory `ParentRepository` adapter.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::UserId;
use crate::domain::parents::{Parent, ParentDraft, ParentLink};
use crate::domain::ports::{ParentRepository, ParentRepositoryError};

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, Parent>,
    // (parent id, student id) -> relationship
    links: BTreeMap<(i64, i64), String>,
}

/// Parent records and parent/student links held in process memory.
#[derive(Debug, Default)]
pub struct MemoryParentRepository {
    table: RwLock<Table>,
}

impl MemoryParentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ParentRepository for MemoryParentRepository {
    async fn insert(&self, draft: &ParentDraft) -> Result<Parent, ParentRepositoryError> {
        let mut table = self.table.write().await;
        if table
            .rows
            .values()
            .any(|parent| parent.email.eq_ignore_ascii_case(&draft.email))
        {
            return Err(ParentRepositoryError::duplicate_email(draft.email.as_str()));
        }
        table.last_id += 1;
        let parent = draft.clone().into_parent(table.last_id);
        table.rows.insert(parent.id, parent.clone());
        Ok(parent)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Parent>, ParentRepositoryError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Parent>, ParentRepositoryError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .find(|parent| parent.user_id.as_ref() == Some(user_id))
            .cloned())
    }

    async fn link(&self, link: &ParentLink) -> Result<(), ParentRepositoryError> {
        let mut table = self.table.write().await;
        let key = (link.parent_id, link.student_id);
        if table.links.contains_key(&key) {
            return Err(ParentRepositoryError::duplicate_link(
                link.parent_id,
                link.student_id,
            ));
        }
        table.links.insert(key, link.relationship.clone());
        Ok(())
    }

    async fn linked_student_ids(&self, parent_id: i64) -> Result<Vec<i64>, ParentRepositoryError> {
        let table = self.table.read().await;
        Ok(table
            .links
            .range((parent_id, i64::MIN)..=(parent_id, i64::MAX))
            .map(|(&(_, student_id), _)| student_id)
            .collect())
    }
}
