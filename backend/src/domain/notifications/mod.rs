//! In-app notifications addressed to login accounts.
//!
//! Reading and acknowledging notifications is self-scoped: the recipient is
//! always the caller's own user id, never an id supplied by the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::identity::roles;
use crate::domain::intent::{Access, impl_intent};
use crate::domain::{PageQuery, Paged, UserId};

mod service;

pub use service::NotificationService;

/// Page size used when a caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// A stored notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub recipient: UserId,
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<UserId>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// Whether the recipient has acknowledged the notification.
    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }
}

/// Validated notification awaiting an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub recipient: UserId,
    pub title: String,
    pub body: String,
    pub sender: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl NewNotification {
    /// Materialise as unread under a storage-assigned id.
    pub fn into_notification(self, id: i64) -> Notification {
        Notification {
            id,
            recipient: self.recipient,
            title: self.title,
            body: self.body,
            sender: self.sender,
            created_at: self.created_at,
            read_at: None,
        }
    }
}

/// Send a notification to an account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationCommand {
    pub recipient: UserId,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
}

/// The caller's notifications, newest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetMyNotificationsQuery {
    pub unread_only: bool,
    pub page: PageQuery,
}

/// Acknowledge one of the caller's notifications.
#[derive(Debug, Clone, Copy)]
pub struct MarkNotificationReadCommand {
    pub notification_id: i64,
}

impl_intent!(
    SendNotificationCommand => Notification,
    Command,
    Access::AnyRole(&[roles::ADMIN, roles::TEACHER])
);
impl_intent!(GetMyNotificationsQuery => Paged<Notification>, Query, Access::Authenticated);
impl_intent!(MarkNotificationReadCommand => Notification, Command, Access::Authenticated);

#[cfg(test)]
mod tests;
