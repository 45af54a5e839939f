//! Tests for notification intents and their handlers.

use std::sync::Arc;

use chrono::Duration;
use rstest::rstest;

use super::*;
use crate::domain::dispatch::IntentHandler;
use crate::domain::identity::IdentityContext;
use crate::domain::ports::{MockNotificationRepository, NotificationRepositoryError};
use crate::domain::{ErrorCode, PageLimits, PageRequest};
use crate::test_support::{MutableClock, fixture_instant};

fn service(repo: MockNotificationRepository) -> NotificationService<MockNotificationRepository> {
    NotificationService::new(Arc::new(repo), MutableClock::shared(), PageLimits::DEFAULT)
}

fn notification(id: i64, recipient: &UserId, read: bool) -> Notification {
    let mut notification = NewNotification {
        recipient: recipient.clone(),
        title: "Timetable".to_owned(),
        body: "Room change".to_owned(),
        sender: None,
        created_at: fixture_instant(),
    }
    .into_notification(id);
    if read {
        notification.read_at = Some(fixture_instant() + Duration::hours(1));
    }
    notification
}

fn caller(user_id: &UserId) -> IdentityContext {
    IdentityContext::authenticated(user_id.clone(), [roles::STUDENT])
}

#[rstest]
#[tokio::test]
async fn anonymous_callers_never_reach_storage() {
    let mut repo = MockNotificationRepository::new();
    repo.expect_list_for_recipient().times(0);
    let envelope = service(repo)
        .handle(GetMyNotificationsQuery::default(), &IdentityContext::anonymous())
        .await
        .expect("ok");
    assert_eq!(envelope.status_code(), 401);
    assert!(envelope.data().is_none());
}

#[rstest]
#[tokio::test]
async fn listing_uses_caller_id_and_default_page_size() {
    let user_id = UserId::random();
    let expected = user_id.clone();
    let mut repo = MockNotificationRepository::new();
    repo.expect_list_for_recipient()
        .withf(move |recipient, unread_only, page| {
            *recipient == expected && *unread_only && page.page_size() == DEFAULT_PAGE_SIZE
        })
        .times(1)
        .returning(|recipient, _, page| {
            Ok(Paged::from_window(page, [notification(3, recipient, false)]))
        });
    let query = GetMyNotificationsQuery {
        unread_only: true,
        page: PageQuery::default(),
    };
    let envelope = service(repo)
        .handle(query, &caller(&user_id))
        .await
        .expect("ok");
    assert_eq!(envelope.status_code(), 200);
    let page = envelope.into_data().expect("page");
    assert_eq!(page.total_count(), 1);
    assert_eq!(page.page_size(), DEFAULT_PAGE_SIZE);
}

#[rstest]
#[tokio::test]
async fn send_records_sender_and_rejects_blank_titles() {
    let recipient = UserId::random();
    let sender = UserId::random();
    let expected_sender = sender.clone();
    let mut repo = MockNotificationRepository::new();
    repo.expect_insert()
        .withf(move |new| new.sender.as_ref() == Some(&expected_sender) && new.body.is_empty())
        .times(1)
        .returning(|new| Ok(new.clone().into_notification(9)));
    let service = service(repo);
    let teacher = IdentityContext::authenticated(sender, [roles::TEACHER]);

    let blank = service
        .handle(
            SendNotificationCommand {
                recipient: recipient.clone(),
                title: " ".to_owned(),
                body: None,
            },
            &teacher,
        )
        .await
        .expect("ok");
    assert_eq!(blank.status_code(), 400);

    let sent = service
        .handle(
            SendNotificationCommand {
                recipient,
                title: "Trip".to_owned(),
                body: Some("  ".to_owned()),
            },
            &teacher,
        )
        .await
        .expect("ok");
    let sent = sent.into_data().expect("notification");
    assert_eq!(sent.id, 9);
    assert_eq!(sent.created_at, fixture_instant());
    assert!(!sent.is_read());
}

#[rstest]
#[tokio::test]
async fn marking_someone_elses_notification_is_forbidden() {
    let owner = UserId::random();
    let mut repo = MockNotificationRepository::new();
    repo.expect_find_by_id()
        .returning(move |id| Ok(Some(notification(id, &owner, false))));
    repo.expect_mark_read().times(0);
    let envelope = service(repo)
        .handle(
            MarkNotificationReadCommand { notification_id: 4 },
            &caller(&UserId::random()),
        )
        .await
        .expect("ok");
    assert_eq!(envelope.status_code(), 403);
}

#[rstest]
#[tokio::test]
async fn marking_read_is_idempotent() {
    let owner = UserId::random();
    let stored_owner = owner.clone();
    let mut repo = MockNotificationRepository::new();
    repo.expect_find_by_id()
        .returning(move |id| Ok(Some(notification(id, &stored_owner, true))));
    repo.expect_mark_read().times(0);
    let envelope = service(repo)
        .handle(MarkNotificationReadCommand { notification_id: 4 }, &caller(&owner))
        .await
        .expect("ok");
    assert_eq!(envelope.status_code(), 200);
    assert!(envelope.into_data().expect("notification").is_read());
}

#[rstest]
#[tokio::test]
async fn marking_unread_stamps_the_clock() {
    let owner = UserId::random();
    let stored_owner = owner.clone();
    let mut repo = MockNotificationRepository::new();
    repo.expect_find_by_id()
        .returning(move |id| Ok(Some(notification(id, &stored_owner, false))));
    let marked_owner = owner.clone();
    repo.expect_mark_read()
        .withf(|id, at| *id == 4 && *at == fixture_instant())
        .times(1)
        .returning(move |id, at| {
            let mut marked = notification(id, &marked_owner, false);
            marked.read_at = Some(at);
            Ok(Some(marked))
        });
    let envelope = service(repo)
        .handle(MarkNotificationReadCommand { notification_id: 4 }, &caller(&owner))
        .await
        .expect("ok");
    assert_eq!(
        envelope.into_data().and_then(|n| n.read_at),
        Some(fixture_instant())
    );
}

#[rstest]
#[case(NotificationRepositoryError::connection("down"), ErrorCode::ServiceUnavailable)]
#[case(NotificationRepositoryError::query("bad"), ErrorCode::InternalError)]
#[tokio::test]
async fn storage_failures_are_faults(
    #[case] error: NotificationRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockNotificationRepository::new();
    repo.expect_find_by_id().return_once(move |_| Err(error));
    let fault = service(repo)
        .handle(
            MarkNotificationReadCommand { notification_id: 1 },
            &caller(&UserId::random()),
        )
        .await
        .expect_err("storage failures are faults");
    assert_eq!(fault.code(), expected);
}

#[rstest]
#[tokio::test]
async fn missing_notifications_are_not_found() {
    let mut repo = MockNotificationRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));
    let envelope = service(repo)
        .handle(
            MarkNotificationReadCommand { notification_id: 77 },
            &caller(&UserId::random()),
        )
        .await
        .expect("ok");
    assert_eq!(envelope.status_code(), 404);
    assert_eq!(envelope.message(), "Notification 77 not found");
}

#[rstest]
fn explicit_page_sizes_are_capped() {
    let limits = PageLimits::DEFAULT.with_default_size(DEFAULT_PAGE_SIZE);
    let page = PageQuery::new(1, 10_000).resolve(limits);
    assert_eq!(page, PageRequest::clamped(Some(1), Some(limits.max_size()), limits));
}
