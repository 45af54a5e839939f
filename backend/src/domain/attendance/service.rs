//! Attendance handlers.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use super::{
    AttendanceRecord, AttendanceStatus, GetAttendanceQuery, MarkAttendanceCommand, NewAttendance,
};
use crate::domain::dispatch::{HandlerResult, IntentHandler, settle};
use crate::domain::identity::IdentityContext;
use crate::domain::ports::{AttendanceRepository, AttendanceRepositoryError, StudentRepository};
use crate::domain::students::{student_not_found, student_storage_error};
use crate::domain::validation::{optional_text, positive_id};
use crate::domain::{Error, PageLimits, Paged, UserId};

fn attendance_storage_error(error: AttendanceRepositoryError) -> Error {
    match error {
        AttendanceRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("attendance repository unavailable: {message}"))
        }
        AttendanceRepositoryError::Query { message } => {
            Error::internal(format!("attendance repository error: {message}"))
        }
        AttendanceRepositoryError::AlreadyMarked {
            student_id,
            course_id,
            date,
        } => Error::conflict(format!(
            "Attendance for student {student_id} in course {course_id} on {date} is already marked"
        )),
    }
}

/// Handles marking and listing attendance.
pub struct AttendanceService<A: ?Sized, S: ?Sized> {
    attendance: Arc<A>,
    students: Arc<S>,
    clock: Arc<dyn Clock>,
    limits: PageLimits,
}

impl<A: ?Sized, S: ?Sized> AttendanceService<A, S> {
    /// Create a service over the attendance and student repositories.
    pub fn new(
        attendance: Arc<A>,
        students: Arc<S>,
        clock: Arc<dyn Clock>,
        limits: PageLimits,
    ) -> Self {
        Self {
            attendance,
            students,
            clock,
            limits,
        }
    }
}

impl<A, S> AttendanceService<A, S>
where
    A: AttendanceRepository + ?Sized,
    S: StudentRepository + ?Sized,
{
    async fn mark(
        &self,
        command: MarkAttendanceCommand,
        recorded_by: Option<UserId>,
    ) -> Result<AttendanceRecord, Error> {
        let student_id = positive_id("studentId", command.student_id)?;
        let course_id = positive_id("courseId", command.course_id)?;
        let status: AttendanceStatus = command.status.parse()?;
        self.students
            .find_by_id(student_id)
            .await
            .map_err(student_storage_error)?
            .ok_or_else(|| student_not_found(student_id))?;

        let record = NewAttendance {
            student_id,
            course_id,
            date: command
                .date
                .unwrap_or_else(|| self.clock.utc().date_naive()),
            status,
            note: optional_text(command.note.as_deref()),
            recorded_by,
        };
        self.attendance
            .insert(&record)
            .await
            .map_err(attendance_storage_error)
    }

    async fn list(&self, query: GetAttendanceQuery) -> Result<Paged<AttendanceRecord>, Error> {
        let filter = query.filter;
        if matches!((filter.from, filter.to), (Some(from), Some(to)) if from > to) {
            return Err(Error::invalid_request("from must not be after to"));
        }
        self.attendance
            .list(&filter, query.page.resolve(self.limits))
            .await
            .map_err(attendance_storage_error)
    }
}

#[async_trait]
impl<A, S> IntentHandler<MarkAttendanceCommand> for AttendanceService<A, S>
where
    A: AttendanceRepository + ?Sized + 'static,
    S: StudentRepository + ?Sized + 'static,
{
    async fn handle(
        &self,
        intent: MarkAttendanceCommand,
        identity: &IdentityContext,
    ) -> HandlerResult<AttendanceRecord> {
        let recorded_by = identity.current_user_id().cloned();
        settle(self.mark(intent, recorded_by).await, "Attendance marked")
    }
}

#[async_trait]
impl<A, S> IntentHandler<GetAttendanceQuery> for AttendanceService<A, S>
where
    A: AttendanceRepository + ?Sized + 'static,
    S: StudentRepository + ?Sized + 'static,
{
    async fn handle(
        &self,
        intent: GetAttendanceQuery,
        _identity: &IdentityContext,
    ) -> HandlerResult<Paged<AttendanceRecord>> {
        settle(self.list(intent).await, "Attendance retrieved")
    }
}
