//! Enrollment handlers.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use super::{
    DropEnrollmentCommand, EnrollStudentCommand, Enrollment, GetStudentEnrollmentsQuery,
    NewEnrollment,
};
use crate::domain::Error;
use crate::domain::dispatch::{HandlerResult, IntentHandler, settle};
use crate::domain::identity::IdentityContext;
use crate::domain::ports::{EnrollmentRepository, EnrollmentRepositoryError, StudentRepository};
use crate::domain::students::{student_not_found, student_storage_error};
use crate::domain::validation::{positive_id, required_text};

/// Map enrollment storage failures onto domain errors.
pub(crate) fn enrollment_storage_error(error: EnrollmentRepositoryError) -> Error {
    match error {
        EnrollmentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("enrollment repository unavailable: {message}"))
        }
        EnrollmentRepositoryError::Query { message } => {
            Error::internal(format!("enrollment repository error: {message}"))
        }
        EnrollmentRepositoryError::AlreadyEnrolled {
            student_id,
            course_id,
        } => Error::conflict(format!(
            "Student {student_id} is already enrolled in course {course_id}"
        )),
        EnrollmentRepositoryError::NotFound { enrollment_id } => {
            Error::not_found(format!("Enrollment {enrollment_id} not found"))
        }
        EnrollmentRepositoryError::NotActive { enrollment_id } => {
            Error::conflict(format!("Enrollment {enrollment_id} is not active"))
        }
    }
}

/// Handles enrolling, dropping and listing enrollments.
pub struct EnrollmentService<E: ?Sized, S: ?Sized> {
    enrollments: Arc<E>,
    students: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<E: ?Sized, S: ?Sized> EnrollmentService<E, S> {
    /// Create a service over the enrollment and student repositories.
    pub fn new(enrollments: Arc<E>, students: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            enrollments,
            students,
            clock,
        }
    }
}

impl<E, S> EnrollmentService<E, S>
where
    E: EnrollmentRepository + ?Sized,
    S: StudentRepository + ?Sized,
{
    async fn ensure_student(&self, student_id: i64) -> Result<(), Error> {
        self.students
            .find_by_id(student_id)
            .await
            .map_err(student_storage_error)?
            .map(|_| ())
            .ok_or_else(|| student_not_found(student_id))
    }

    async fn enroll(&self, command: EnrollStudentCommand) -> Result<Enrollment, Error> {
        let student_id = positive_id("studentId", command.student_id)?;
        let course_id = positive_id("courseId", command.course_id)?;
        let semester = required_text("semester", &command.semester)?;
        self.ensure_student(student_id).await?;

        let enrollment = NewEnrollment {
            student_id,
            course_id,
            semester,
            enrolled_at: self.clock.utc(),
        };
        self.enrollments
            .insert_if_no_active(&enrollment)
            .await
            .map_err(enrollment_storage_error)
    }

    async fn drop_enrollment(&self, command: DropEnrollmentCommand) -> Result<Enrollment, Error> {
        let enrollment_id = positive_id("enrollmentId", command.enrollment_id)?;
        self.enrollments
            .drop_active(enrollment_id, self.clock.utc())
            .await
            .map_err(enrollment_storage_error)
    }

    async fn list(&self, query: GetStudentEnrollmentsQuery) -> Result<Vec<Enrollment>, Error> {
        let student_id = positive_id("studentId", query.student_id)?;
        self.ensure_student(student_id).await?;
        let mut enrollments = self
            .enrollments
            .list_for_student(student_id)
            .await
            .map_err(enrollment_storage_error)?;
        if query.active_only {
            enrollments.retain(Enrollment::is_active);
        }
        Ok(enrollments)
    }
}

#[async_trait]
impl<E, S> IntentHandler<EnrollStudentCommand> for EnrollmentService<E, S>
where
    E: EnrollmentRepository + ?Sized + 'static,
    S: StudentRepository + ?Sized + 'static,
{
    async fn handle(
        &self,
        intent: EnrollStudentCommand,
        _identity: &IdentityContext,
    ) -> HandlerResult<Enrollment> {
        settle(self.enroll(intent).await, "Student enrolled")
    }
}

#[async_trait]
impl<E, S> IntentHandler<DropEnrollmentCommand> for EnrollmentService<E, S>
where
    E: EnrollmentRepository + ?Sized + 'static,
    S: StudentRepository + ?Sized + 'static,
{
    async fn handle(
        &self,
        intent: DropEnrollmentCommand,
        _identity: &IdentityContext,
    ) -> HandlerResult<Enrollment> {
        settle(self.drop_enrollment(intent).await, "Enrollment dropped")
    }
}

#[async_trait]
impl<E, S> IntentHandler<GetStudentEnrollmentsQuery> for EnrollmentService<E, S>
where
    E: EnrollmentRepository + ?Sized + 'static,
    S: StudentRepository + ?Sized + 'static,
{
    async fn handle(
        &self,
        intent: GetStudentEnrollmentsQuery,
        _identity: &IdentityContext,
    ) -> HandlerResult<Vec<Enrollment>> {
        settle(self.list(intent).await, "Enrollments retrieved")
    }
}
