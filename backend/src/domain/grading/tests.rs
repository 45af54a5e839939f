//! Tests for grading intents and their handlers.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::dispatch::IntentHandler;
use crate::domain::identity::IdentityContext;
use crate::domain::ports::{MockEnrollmentRepository, MockGradeRepository, MockStudentRepository};
use crate::domain::students::Student;
use crate::test_support::{MutableClock, fixture_instant};

type Service = GradingService<MockGradeRepository, MockEnrollmentRepository, MockStudentRepository>;

fn service(
    grades: MockGradeRepository,
    enrollments: MockEnrollmentRepository,
    students: MockStudentRepository,
) -> Service {
    GradingService::new(
        Arc::new(grades),
        Arc::new(enrollments),
        Arc::new(students),
        MutableClock::shared(),
    )
}

fn student(id: i64, user_id: Option<UserId>) -> Student {
    Student {
        id,
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        email: "ada@school.example".to_owned(),
        date_of_birth: None,
        user_id,
    }
}

fn existing_students() -> MockStudentRepository {
    let mut students = MockStudentRepository::new();
    students
        .expect_find_by_id()
        .returning(|id| Ok(Some(student(id, None))));
    students
}

fn enrolled(active: bool) -> MockEnrollmentRepository {
    let mut enrollments = MockEnrollmentRepository::new();
    enrollments
        .expect_has_active()
        .returning(move |_, _| Ok(active));
    enrollments
}

fn record(score: f64) -> RecordGradeCommand {
    RecordGradeCommand {
        student_id: 1,
        course_id: 5,
        score,
        comment: None,
    }
}

fn grade(id: i64, student_id: i64, score: f64) -> Grade {
    let score = Score::new(score).expect("valid score");
    NewGrade {
        student_id,
        course_id: 5,
        score,
        comment: None,
        recorded_by: None,
        recorded_at: fixture_instant(),
    }
    .into_grade(id)
}

#[rstest]
#[case(100.0, LetterGrade::A)]
#[case(90.0, LetterGrade::A)]
#[case(89.99, LetterGrade::B)]
#[case(80.0, LetterGrade::B)]
#[case(70.0, LetterGrade::C)]
#[case(60.0, LetterGrade::D)]
#[case(59.9, LetterGrade::F)]
#[case(0.0, LetterGrade::F)]
fn letters_follow_the_grade_bands(#[case] score: f64, #[case] expected: LetterGrade) {
    assert_eq!(LetterGrade::from_score(score), expected);
}

#[rstest]
#[case(-0.5)]
#[case(100.5)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
#[tokio::test]
async fn out_of_range_scores_are_rejected(#[case] score: f64) {
    let mut students = MockStudentRepository::new();
    students.expect_find_by_id().times(0);
    let teacher = IdentityContext::authenticated(UserId::random(), [roles::TEACHER]);

    let envelope = service(MockGradeRepository::new(), MockEnrollmentRepository::new(), students)
        .handle(record(score), &teacher)
        .await
        .expect("ok");
    assert_eq!(envelope.status_code(), 400);
    assert_eq!(envelope.message(), "score must be between 0 and 100");
}

#[rstest]
#[tokio::test]
async fn grades_need_an_active_enrollment() {
    let mut grades = MockGradeRepository::new();
    grades.expect_insert().times(0);
    let teacher = IdentityContext::authenticated(UserId::random(), [roles::TEACHER]);

    let envelope = service(grades, enrolled(false), existing_students())
        .handle(record(75.0), &teacher)
        .await
        .expect("ok");
    assert_eq!(envelope.status_code(), 409);
    assert_eq!(
        envelope.message(),
        "Student 1 is not actively enrolled in course 5"
    );
}

#[rstest]
#[tokio::test]
async fn recorded_grades_carry_letter_author_and_time() {
    let teacher_id = UserId::random();
    let expected_author = teacher_id.clone();
    let mut grades = MockGradeRepository::new();
    grades
        .expect_insert()
        .withf(move |new| {
            new.recorded_by.as_ref() == Some(&expected_author)
                && new.recorded_at == fixture_instant()
                && new.comment.as_deref() == Some("Strong work")
        })
        .returning(|new| Ok(new.clone().into_grade(21)));
    let teacher = IdentityContext::authenticated(teacher_id, [roles::TEACHER]);

    let command = RecordGradeCommand {
        comment: Some(" Strong work ".to_owned()),
        ..record(84.0)
    };
    let created = service(grades, enrolled(true), existing_students())
        .handle(command, &teacher)
        .await
        .expect("ok")
        .into_data()
        .expect("grade present");
    assert_eq!(created.letter, LetterGrade::B);
    assert_eq!(created.score.value(), 84.0);
}

#[rstest]
#[tokio::test]
async fn anonymous_callers_have_no_grades() {
    let mut students = MockStudentRepository::new();
    students.expect_find_by_user_id().times(0);
    let mut grades = MockGradeRepository::new();
    grades.expect_list_for_student().times(0);

    let envelope = service(grades, MockEnrollmentRepository::new(), students)
        .handle(GetMyGradesQuery::default(), &IdentityContext::anonymous())
        .await
        .expect("ok");
    assert_eq!(envelope.status_code(), 401);
}

#[rstest]
#[tokio::test]
async fn my_grades_resolve_the_student_from_the_caller() {
    let account = UserId::random();
    let mut students = MockStudentRepository::new();
    students
        .expect_find_by_user_id()
        .returning(|user_id| Ok(Some(student(8, Some(user_id.clone())))));
    let mut grades = MockGradeRepository::new();
    grades
        .expect_list_for_student()
        .withf(|student_id, course_id| *student_id == 8 && course_id.is_none())
        .returning(|student_id, _| Ok(vec![grade(1, student_id, 91.0)]));

    let identity = IdentityContext::authenticated(account, [roles::STUDENT]);
    let listed = service(grades, MockEnrollmentRepository::new(), students)
        .handle(GetMyGradesQuery::default(), &identity)
        .await
        .expect("ok")
        .into_data()
        .expect("grades present");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed.first().map(|g| g.letter), Some(LetterGrade::A));
}

#[rstest]
#[tokio::test]
async fn accounts_without_a_student_record_are_not_found() {
    let mut students = MockStudentRepository::new();
    students.expect_find_by_user_id().returning(|_| Ok(None));
    let identity = IdentityContext::authenticated(UserId::random(), [roles::STUDENT]);

    let envelope = service(MockGradeRepository::new(), MockEnrollmentRepository::new(), students)
        .handle(GetMyGradesQuery::default(), &identity)
        .await
        .expect("ok");
    assert_eq!(envelope.status_code(), 404);
}

#[rstest]
#[tokio::test]
async fn student_grades_can_be_limited_to_a_course() {
    let mut grades = MockGradeRepository::new();
    grades
        .expect_list_for_student()
        .withf(|student_id, course_id| *student_id == 1 && *course_id == Some(5))
        .returning(|student_id, _| Ok(vec![grade(2, student_id, 55.0)]));
    let teacher = IdentityContext::authenticated(UserId::random(), [roles::TEACHER]);

    let listed = service(grades, MockEnrollmentRepository::new(), existing_students())
        .handle(
            GetStudentGradesQuery {
                student_id: 1,
                course_id: Some(5),
            },
            &teacher,
        )
        .await
        .expect("ok")
        .into_data()
        .expect("grades present");
    assert_eq!(listed.first().map(|g| g.letter), Some(LetterGrade::F));
}
