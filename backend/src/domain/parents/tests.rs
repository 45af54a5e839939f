//! Tests for parent intents and their handlers.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::dispatch::IntentHandler;
use crate::domain::identity::IdentityContext;
use crate::domain::ports::{MockParentRepository, MockStudentRepository, ParentRepositoryError};

type Service = ParentService<MockParentRepository, MockStudentRepository>;

fn service(parents: MockParentRepository, students: MockStudentRepository) -> Service {
    ParentService::new(Arc::new(parents), Arc::new(students))
}

fn parent(id: i64, user_id: Option<UserId>) -> Parent {
    Parent {
        id,
        first_name: "Mary".to_owned(),
        last_name: "Shelley".to_owned(),
        email: "mary@home.example".to_owned(),
        phone: None,
        user_id,
    }
}

fn student(id: i64, last: &str) -> Student {
    Student {
        id,
        first_name: "Kid".to_owned(),
        last_name: last.to_owned(),
        email: format!("kid{id}@school.example"),
        date_of_birth: None,
        user_id: None,
    }
}

fn admin() -> IdentityContext {
    IdentityContext::authenticated(UserId::random(), [roles::ADMIN])
}

fn link_command(relationship: Option<&str>) -> LinkParentToStudentCommand {
    LinkParentToStudentCommand {
        parent_id: 1,
        student_id: 2,
        relationship: relationship.map(str::to_owned),
    }
}

#[rstest]
#[tokio::test]
async fn parents_are_created_with_optional_phone_trimmed() {
    let mut parents = MockParentRepository::new();
    parents
        .expect_insert()
        .withf(|draft| draft.phone.is_none() && draft.email == "mary@home.example")
        .times(1)
        .returning(|draft| Ok(draft.clone().into_parent(4)));

    let command = CreateParentCommand {
        first_name: "Mary".to_owned(),
        last_name: "Shelley".to_owned(),
        email: "MARY@home.example".to_owned(),
        phone: Some("   ".to_owned()),
        user_id: None,
    };
    let envelope = service(parents, MockStudentRepository::new())
        .handle(command, &admin())
        .await
        .expect("ok");
    assert_eq!(envelope.into_data().map(|p| p.id), Some(4));
}

#[rstest]
#[case(None, DEFAULT_RELATIONSHIP)]
#[case(Some("  Mother "), "Mother")]
#[tokio::test]
async fn links_default_their_relationship(
    #[case] relationship: Option<&str>,
    #[case] expected: &str,
) {
    let mut parents = MockParentRepository::new();
    parents
        .expect_find_by_id()
        .returning(|id| Ok(Some(parent(id, None))));
    parents.expect_link().times(1).returning(|_| Ok(()));
    let mut students = MockStudentRepository::new();
    students
        .expect_find_by_id()
        .returning(|id| Ok(Some(student(id, "Shelley"))));

    let link = service(parents, students)
        .handle(link_command(relationship), &admin())
        .await
        .expect("ok")
        .into_data()
        .expect("link present");
    assert_eq!(link.relationship, expected);
    assert_eq!((link.parent_id, link.student_id), (1, 2));
}

#[rstest]
#[case(false, true, "Parent 1 not found")]
#[case(true, false, "Student 2 not found")]
#[tokio::test]
async fn links_need_both_ends(
    #[case] parent_exists: bool,
    #[case] student_exists: bool,
    #[case] message: &str,
) {
    let mut parents = MockParentRepository::new();
    parents
        .expect_find_by_id()
        .returning(move |id| Ok(parent_exists.then(|| parent(id, None))));
    parents.expect_link().times(0);
    let mut students = MockStudentRepository::new();
    students
        .expect_find_by_id()
        .returning(move |id| Ok(student_exists.then(|| student(id, "X"))));

    let envelope = service(parents, students)
        .handle(link_command(None), &admin())
        .await
        .expect("ok");
    assert_eq!(envelope.status_code(), 404);
    assert_eq!(envelope.message(), message);
}

#[rstest]
#[tokio::test]
async fn duplicate_links_conflict() {
    let mut parents = MockParentRepository::new();
    parents
        .expect_find_by_id()
        .returning(|id| Ok(Some(parent(id, None))));
    parents
        .expect_link()
        .returning(|link| {
            Err(ParentRepositoryError::duplicate_link(link.parent_id, link.student_id))
        });
    let mut students = MockStudentRepository::new();
    students
        .expect_find_by_id()
        .returning(|id| Ok(Some(student(id, "X"))));

    let envelope = service(parents, students)
        .handle(link_command(None), &admin())
        .await
        .expect("ok");
    assert_eq!(envelope.status_code(), 409);
    assert_eq!(envelope.message(), "Parent 1 is already linked to student 2");
}

#[rstest]
#[tokio::test]
async fn anonymous_callers_have_no_children_to_list() {
    let mut parents = MockParentRepository::new();
    parents.expect_find_by_user_id().times(0);
    let envelope = service(parents, MockStudentRepository::new())
        .handle(GetMyChildrenQuery, &IdentityContext::anonymous())
        .await
        .expect("ok");
    assert_eq!(envelope.status_code(), 401);
}

#[rstest]
#[tokio::test]
async fn accounts_without_a_parent_record_are_not_found() {
    let mut parents = MockParentRepository::new();
    parents.expect_find_by_user_id().returning(|_| Ok(None));
    let identity = IdentityContext::authenticated(UserId::random(), [roles::PARENT]);
    let envelope = service(parents, MockStudentRepository::new())
        .handle(GetMyChildrenQuery, &identity)
        .await
        .expect("ok");
    assert_eq!(envelope.status_code(), 404);
}

#[rstest]
#[tokio::test]
async fn children_are_resolved_from_the_caller_and_sorted() {
    let account = UserId::random();
    let expected_account = account.clone();
    let mut parents = MockParentRepository::new();
    parents
        .expect_find_by_user_id()
        .withf(move |user_id| *user_id == expected_account)
        .returning(|user_id| Ok(Some(parent(9, Some(user_id.clone())))));
    parents
        .expect_linked_student_ids()
        .withf(|parent_id| *parent_id == 9)
        .returning(|_| Ok(vec![5, 6, 7]));
    let mut students = MockStudentRepository::new();
    students.expect_find_by_id().returning(|id| {
        Ok(match id {
            5 => Some(student(5, "Zeller")),
            6 => None,
            _ => Some(student(id, "Adams")),
        })
    });

    let identity = IdentityContext::authenticated(account, [roles::PARENT]);
    let children = service(parents, students)
        .handle(GetMyChildrenQuery, &identity)
        .await
        .expect("ok")
        .into_data()
        .expect("children present");
    let ids: Vec<i64> = children.iter().map(|child| child.id).collect();
    assert_eq!(ids, vec![7, 5]);
}
