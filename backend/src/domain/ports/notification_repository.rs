//! Port abstraction for notification storage adapters and their errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::notifications::{NewNotification, Notification};
use crate::domain::{PageRequest, Paged, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by notification repository adapters.
    pub enum NotificationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "notification repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "notification repository query failed: {message}",
    }
}

/// Storage for notifications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Store a notification and return it with its assigned id.
    async fn insert(
        &self,
        notification: &NewNotification,
    ) -> Result<Notification, NotificationRepositoryError>;

    /// Fetch a notification by id.
    async fn find_by_id(
        &self,
        id: i64,
    ) -> Result<Option<Notification>, NotificationRepositoryError>;

    /// Set `read_at` on an unread notification; read ones are returned
    /// unchanged. `None` when it does not exist.
    async fn mark_read(
        &self,
        id: i64,
        at: DateTime<Utc>,
    ) -> Result<Option<Notification>, NotificationRepositoryError>;

    /// One page of notifications addressed to `recipient`, newest first.
    async fn list_for_recipient(
        &self,
        recipient: &UserId,
        unread_only: bool,
        page: PageRequest,
    ) -> Result<Paged<Notification>, NotificationRepositoryError>;
}
