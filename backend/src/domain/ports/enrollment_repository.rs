//! Port abstraction for enrollment storage adapters and their errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::enrollment::{Enrollment, NewEnrollment};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by enrollment repository adapters.
    pub enum EnrollmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "enrollment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "enrollment repository query failed: {message}",
        /// An active enrollment already exists for the student and course.
        AlreadyEnrolled { student_id: i64, course_id: i64 } =>
            "student {student_id} already actively enrolled in course {course_id}",
        /// No enrollment has the given id.
        NotFound { enrollment_id: i64 } => "enrollment {enrollment_id} does not exist",
        /// The enrollment exists but is no longer active.
        NotActive { enrollment_id: i64 } => "enrollment {enrollment_id} is not active",
    }
}

/// Storage for enrollments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Insert `enrollment` unless the student already holds an active
    /// enrollment in the course. The check and insert are atomic.
    async fn insert_if_no_active(
        &self,
        enrollment: &NewEnrollment,
    ) -> Result<Enrollment, EnrollmentRepositoryError>;

    /// Mark an active enrollment as dropped at `at`.
    async fn drop_active(
        &self,
        enrollment_id: i64,
        at: DateTime<Utc>,
    ) -> Result<Enrollment, EnrollmentRepositoryError>;

    /// Whether the student holds an active enrollment in the course.
    async fn has_active(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<bool, EnrollmentRepositoryError>;

    /// Every enrollment held by the student, newest first.
    async fn list_for_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError>;
}
