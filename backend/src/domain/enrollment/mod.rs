//! Course enrollments.
//!
//! A student holds at most one active enrollment per course. The repository
//! enforces this atomically so two racing enroll commands cannot both
//! succeed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::identity::roles;
use crate::domain::intent::{Access, impl_intent};

mod service;

pub use service::EnrollmentService;
pub(crate) use service::enrollment_storage_error;

/// Lifecycle state of an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EnrollmentStatus {
    Active,
    Dropped,
}

/// A student's place on a course for one semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub semester: String,
    pub enrolled_at: DateTime<Utc>,
    pub status: EnrollmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropped_at: Option<DateTime<Utc>>,
}

impl Enrollment {
    /// Whether the enrollment is still active.
    pub fn is_active(&self) -> bool {
        self.status == EnrollmentStatus::Active
    }
}

/// Validated enrollment awaiting an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEnrollment {
    pub student_id: i64,
    pub course_id: i64,
    pub semester: String,
    pub enrolled_at: DateTime<Utc>,
}

impl NewEnrollment {
    /// Materialise as an active enrollment under a storage-assigned id.
    pub fn into_enrollment(self, id: i64) -> Enrollment {
        Enrollment {
            id,
            student_id: self.student_id,
            course_id: self.course_id,
            semester: self.semester,
            enrolled_at: self.enrolled_at,
            status: EnrollmentStatus::Active,
            dropped_at: None,
        }
    }
}

/// Enroll a student on a course.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollStudentCommand {
    pub student_id: i64,
    pub course_id: i64,
    pub semester: String,
}

/// Drop an active enrollment.
#[derive(Debug, Clone, Copy)]
pub struct DropEnrollmentCommand {
    pub enrollment_id: i64,
}

/// Enrollments held by one student, newest first.
#[derive(Debug, Clone, Copy)]
pub struct GetStudentEnrollmentsQuery {
    pub student_id: i64,
    pub active_only: bool,
}

impl_intent!(EnrollStudentCommand => Enrollment, Command, Access::AnyRole(&[roles::ADMIN]));
impl_intent!(DropEnrollmentCommand => Enrollment, Command, Access::AnyRole(&[roles::ADMIN]));
impl_intent!(
    GetStudentEnrollmentsQuery => Vec<Enrollment>,
    Query,
    Access::AnyRole(&[roles::ADMIN, roles::TEACHER])
);
