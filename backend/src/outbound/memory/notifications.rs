//! In-memory `NotificationRepository` adapter.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::notifications::{NewNotification, Notification};
use crate::domain::ports::{NotificationRepository, NotificationRepositoryError};
use crate::domain::{PageRequest, Paged, UserId};

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, Notification>,
}

/// Notifications held in process memory.
#[derive(Debug, Default)]
pub struct MemoryNotificationRepository {
    table: RwLock<Table>,
}

impl MemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationRepository for MemoryNotificationRepository {
    async fn insert(
        &self,
        notification: &NewNotification,
    ) -> Result<Notification, NotificationRepositoryError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let stored = notification.clone().into_notification(table.last_id);
        table.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(
        &self,
        id: i64,
    ) -> Result<Option<Notification>, NotificationRepositoryError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn mark_read(
        &self,
        id: i64,
        at: DateTime<Utc>,
    ) -> Result<Option<Notification>, NotificationRepositoryError> {
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).map(|notification| {
            notification.read_at.get_or_insert(at);
            notification.clone()
        }))
    }

    async fn list_for_recipient(
        &self,
        recipient: &UserId,
        unread_only: bool,
        page: PageRequest,
    ) -> Result<Paged<Notification>, NotificationRepositoryError> {
        let table = self.table.read().await;
        let mut matching: Vec<Notification> = table
            .rows
            .values()
            .filter(|notification| notification.recipient == *recipient)
            .filter(|notification| !unread_only || !notification.is_read())
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(Paged::from_window(page, matching))
    }
}
