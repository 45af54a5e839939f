//! In-memory `CategoryRepository` adapter.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::categories::{Category, NewCategory};
use crate::domain::ports::{CategoryRepository, CategoryRepositoryError};
use crate::domain::{PageRequest, Paged};

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, Category>,
}

/// Categories held in process memory.
#[derive(Debug, Default)]
pub struct MemoryCategoryRepository {
    table: RwLock<Table>,
}

impl MemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for MemoryCategoryRepository {
    async fn insert(&self, category: &NewCategory) -> Result<Category, CategoryRepositoryError> {
        let mut table = self.table.write().await;
        let wanted = category.name.to_lowercase();
        if table
            .rows
            .values()
            .any(|existing| existing.name.to_lowercase() == wanted)
        {
            return Err(CategoryRepositoryError::duplicate_name(category.name.as_str()));
        }
        table.last_id += 1;
        let stored = category.clone().into_category(table.last_id);
        table.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn list(
        &self,
        search: Option<String>,
        page: PageRequest,
    ) -> Result<Paged<Category>, CategoryRepositoryError> {
        let table = self.table.read().await;
        let mut matching: Vec<Category> = table
            .rows
            .values()
            .filter(|category| {
                search
                    .as_deref()
                    .is_none_or(|term| category.name.to_lowercase().contains(term))
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(Paged::from_window(page, matching))
    }
}
