//! Grading handlers.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use super::{GetMyGradesQuery, GetStudentGradesQuery, Grade, NewGrade, RecordGradeCommand, Score};
use crate::domain::dispatch::{HandlerResult, IntentHandler, settle};
use crate::domain::enrollment::enrollment_storage_error;
use crate::domain::identity::IdentityContext;
use crate::domain::ports::{
    EnrollmentRepository, GradeRepository, GradeRepositoryError, StudentRepository,
};
use crate::domain::students::{Student, student_not_found, student_storage_error};
use crate::domain::validation::{optional_text, positive_id};
use crate::domain::{Error, UserId};

fn grade_storage_error(error: GradeRepositoryError) -> Error {
    match error {
        GradeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("grade repository unavailable: {message}"))
        }
        GradeRepositoryError::Query { message } => {
            Error::internal(format!("grade repository error: {message}"))
        }
    }
}

/// Handles recording and reading grades.
pub struct GradingService<G: ?Sized, E: ?Sized, S: ?Sized> {
    grades: Arc<G>,
    enrollments: Arc<E>,
    students: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<G: ?Sized, E: ?Sized, S: ?Sized> GradingService<G, E, S> {
    /// Create a service over the grade, enrollment and student repositories.
    pub fn new(
        grades: Arc<G>,
        enrollments: Arc<E>,
        students: Arc<S>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            grades,
            enrollments,
            students,
            clock,
        }
    }
}

impl<G, E, S> GradingService<G, E, S>
where
    G: GradeRepository + ?Sized,
    E: EnrollmentRepository + ?Sized,
    S: StudentRepository + ?Sized,
{
    async fn student(&self, student_id: i64) -> Result<Student, Error> {
        self.students
            .find_by_id(student_id)
            .await
            .map_err(student_storage_error)?
            .ok_or_else(|| student_not_found(student_id))
    }

    async fn record(
        &self,
        command: RecordGradeCommand,
        recorded_by: Option<UserId>,
    ) -> Result<Grade, Error> {
        let student_id = positive_id("studentId", command.student_id)?;
        let course_id = positive_id("courseId", command.course_id)?;
        let score = Score::new(command.score)?;
        self.student(student_id).await?;

        let enrolled = self
            .enrollments
            .has_active(student_id, course_id)
            .await
            .map_err(enrollment_storage_error)?;
        if !enrolled {
            return Err(Error::conflict(format!(
                "Student {student_id} is not actively enrolled in course {course_id}"
            )));
        }

        let grade = NewGrade {
            student_id,
            course_id,
            score,
            comment: optional_text(command.comment.as_deref()),
            recorded_by,
            recorded_at: self.clock.utc(),
        };
        self.grades.insert(&grade).await.map_err(grade_storage_error)
    }

    async fn grades_for(
        &self,
        student_id: i64,
        course_id: Option<i64>,
    ) -> Result<Vec<Grade>, Error> {
        self.grades
            .list_for_student(student_id, course_id)
            .await
            .map_err(grade_storage_error)
    }

    async fn student_grades(&self, query: GetStudentGradesQuery) -> Result<Vec<Grade>, Error> {
        let student_id = positive_id("studentId", query.student_id)?;
        self.student(student_id).await?;
        self.grades_for(student_id, query.course_id).await
    }

    async fn my_grades(
        &self,
        query: GetMyGradesQuery,
        user_id: &UserId,
    ) -> Result<Vec<Grade>, Error> {
        let student = self
            .students
            .find_by_user_id(user_id)
            .await
            .map_err(student_storage_error)?
            .ok_or_else(|| Error::not_found("No student record is linked to this account"))?;
        self.grades_for(student.id, query.course_id).await
    }
}

#[async_trait]
impl<G, E, S> IntentHandler<RecordGradeCommand> for GradingService<G, E, S>
where
    G: GradeRepository + ?Sized + 'static,
    E: EnrollmentRepository + ?Sized + 'static,
    S: StudentRepository + ?Sized + 'static,
{
    async fn handle(
        &self,
        intent: RecordGradeCommand,
        identity: &IdentityContext,
    ) -> HandlerResult<Grade> {
        let recorded_by = identity.current_user_id().cloned();
        settle(self.record(intent, recorded_by).await, "Grade recorded")
    }
}

#[async_trait]
impl<G, E, S> IntentHandler<GetStudentGradesQuery> for GradingService<G, E, S>
where
    G: GradeRepository + ?Sized + 'static,
    E: EnrollmentRepository + ?Sized + 'static,
    S: StudentRepository + ?Sized + 'static,
{
    async fn handle(
        &self,
        intent: GetStudentGradesQuery,
        _identity: &IdentityContext,
    ) -> HandlerResult<Vec<Grade>> {
        settle(self.student_grades(intent).await, "Grades retrieved")
    }
}

#[async_trait]
impl<G, E, S> IntentHandler<GetMyGradesQuery> for GradingService<G, E, S>
where
    G: GradeRepository + ?Sized + 'static,
    E: EnrollmentRepository + ?Sized + 'static,
    S: StudentRepository + ?Sized + 'static,
{
    async fn handle(
        &self,
        intent: GetMyGradesQuery,
        identity: &IdentityContext,
    ) -> HandlerResult<Vec<Grade>> {
        let outcome = match identity.require_user_id() {
            Ok(user_id) => self.my_grades(intent, user_id).await,
            Err(error) => Err(error),
        };
        settle(outcome, "Grades retrieved")
    }
}
