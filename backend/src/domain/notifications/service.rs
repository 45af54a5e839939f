//! Notification handlers.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use super::{
    DEFAULT_PAGE_SIZE, GetMyNotificationsQuery, MarkNotificationReadCommand, NewNotification,
    Notification, SendNotificationCommand,
};
use crate::domain::dispatch::{HandlerResult, IntentHandler, settle};
use crate::domain::identity::IdentityContext;
use crate::domain::ports::{NotificationRepository, NotificationRepositoryError};
use crate::domain::validation::{optional_text, positive_id, required_text};
use crate::domain::{Error, PageLimits, Paged, UserId};

fn notification_storage_error(error: NotificationRepositoryError) -> Error {
    match error {
        NotificationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("notification repository unavailable: {message}"))
        }
        NotificationRepositoryError::Query { message } => {
            Error::internal(format!("notification repository error: {message}"))
        }
    }
}

fn notification_not_found(id: i64) -> Error {
    Error::not_found(format!("Notification {id} not found"))
}

/// Handles sending, listing and acknowledging notifications.
pub struct NotificationService<R: ?Sized> {
    notifications: Arc<R>,
    clock: Arc<dyn Clock>,
    limits: PageLimits,
}

impl<R: ?Sized> NotificationService<R> {
    /// Create a service over `notifications`.
    ///
    /// Listing defaults to [`DEFAULT_PAGE_SIZE`] items, capped by `limits`.
    pub fn new(notifications: Arc<R>, clock: Arc<dyn Clock>, limits: PageLimits) -> Self {
        Self {
            notifications,
            clock,
            limits: limits.with_default_size(DEFAULT_PAGE_SIZE),
        }
    }
}

impl<R> NotificationService<R>
where
    R: NotificationRepository + ?Sized,
{
    async fn send(
        &self,
        command: SendNotificationCommand,
        sender: Option<UserId>,
    ) -> Result<Notification, Error> {
        let notification = NewNotification {
            recipient: command.recipient,
            title: required_text("title", &command.title)?,
            body: optional_text(command.body.as_deref()).unwrap_or_default(),
            sender,
            created_at: self.clock.utc(),
        };
        self.notifications
            .insert(&notification)
            .await
            .map_err(notification_storage_error)
    }

    async fn list_mine(
        &self,
        query: GetMyNotificationsQuery,
        recipient: &UserId,
    ) -> Result<Paged<Notification>, Error> {
        self.notifications
            .list_for_recipient(recipient, query.unread_only, query.page.resolve(self.limits))
            .await
            .map_err(notification_storage_error)
    }

    async fn mark_read(
        &self,
        command: MarkNotificationReadCommand,
        caller: &UserId,
    ) -> Result<Notification, Error> {
        let id = positive_id("notificationId", command.notification_id)?;
        let notification = self
            .notifications
            .find_by_id(id)
            .await
            .map_err(notification_storage_error)?
            .ok_or_else(|| notification_not_found(id))?;
        if notification.recipient != *caller {
            return Err(Error::forbidden(format!(
                "Notification {id} belongs to another user"
            )));
        }
        if notification.is_read() {
            return Ok(notification);
        }
        self.notifications
            .mark_read(id, self.clock.utc())
            .await
            .map_err(notification_storage_error)?
            .ok_or_else(|| notification_not_found(id))
    }
}

#[async_trait]
impl<R> IntentHandler<SendNotificationCommand> for NotificationService<R>
where
    R: NotificationRepository + ?Sized + 'static,
{
    async fn handle(
        &self,
        intent: SendNotificationCommand,
        identity: &IdentityContext,
    ) -> HandlerResult<Notification> {
        let sender = identity.current_user_id().cloned();
        settle(self.send(intent, sender).await, "Notification sent")
    }
}

#[async_trait]
impl<R> IntentHandler<GetMyNotificationsQuery> for NotificationService<R>
where
    R: NotificationRepository + ?Sized + 'static,
{
    async fn handle(
        &self,
        intent: GetMyNotificationsQuery,
        identity: &IdentityContext,
    ) -> HandlerResult<Paged<Notification>> {
        let outcome = match identity.require_user_id() {
            Ok(user_id) => self.list_mine(intent, user_id).await,
            Err(error) => Err(error),
        };
        settle(outcome, "Notifications retrieved")
    }
}

#[async_trait]
impl<R> IntentHandler<MarkNotificationReadCommand> for NotificationService<R>
where
    R: NotificationRepository + ?Sized + 'static,
{
    async fn handle(
        &self,
        intent: MarkNotificationReadCommand,
        identity: &IdentityContext,
    ) -> HandlerResult<Notification> {
        let outcome = match identity.require_user_id() {
            Ok(user_id) => self.mark_read(intent, user_id).await,
            Err(error) => Err(error),
        };
        settle(outcome, "Notification marked as read")
    }
}
