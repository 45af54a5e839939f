//! Port abstraction for attendance storage adapters and their errors.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::attendance::{AttendanceFilter, AttendanceRecord, NewAttendance};
use crate::domain::{PageRequest, Paged};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by attendance repository adapters.
    pub enum AttendanceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "attendance repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "attendance repository query failed: {message}",
        /// A mark already exists for the student, course and date.
        AlreadyMarked { student_id: i64, course_id: i64, date: NaiveDate } =>
            "attendance already marked for student {student_id} in course {course_id} on {date}",
    }
}

/// Storage for attendance marks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Store a mark unless one exists for the same student, course and date.
    async fn insert(
        &self,
        record: &NewAttendance,
    ) -> Result<AttendanceRecord, AttendanceRepositoryError>;

    /// One page of marks matching `filter`, newest date first.
    async fn list(
        &self,
        filter: &AttendanceFilter,
        page: PageRequest,
    ) -> Result<Paged<AttendanceRecord>, AttendanceRepositoryError>;
}
