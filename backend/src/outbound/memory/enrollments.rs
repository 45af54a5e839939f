//! In-memory `EnrollmentRepository` adapter.
//!
//! The active-enrollment check and the insert run under one write lock so two
//! concurrent enrolments for the same student and course cannot both succeed.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::enrollment::{Enrollment, EnrollmentStatus, NewEnrollment};
use crate::domain::ports::{EnrollmentRepository, EnrollmentRepositoryError};

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, Enrollment>,
}

impl Table {
    fn has_active(&self, student_id: i64, course_id: i64) -> bool {
        self.rows.values().any(|enrollment| {
            enrollment.is_active()
                && enrollment.student_id == student_id
                && enrollment.course_id == course_id
        })
    }
}

/// Enrollments held in process memory.
#[derive(Debug, Default)]
pub struct MemoryEnrollmentRepository {
    table: RwLock<Table>,
}

impl MemoryEnrollmentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EnrollmentRepository for MemoryEnrollmentRepository {
    async fn insert_if_no_active(
        &self,
        enrollment: &NewEnrollment,
    ) -> Result<Enrollment, EnrollmentRepositoryError> {
        let mut table = self.table.write().await;
        if table.has_active(enrollment.student_id, enrollment.course_id) {
            return Err(EnrollmentRepositoryError::already_enrolled(
                enrollment.student_id,
                enrollment.course_id,
            ));
        }
        table.last_id += 1;
        let stored = enrollment.clone().into_enrollment(table.last_id);
        table.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn drop_active(
        &self,
        enrollment_id: i64,
        at: DateTime<Utc>,
    ) -> Result<Enrollment, EnrollmentRepositoryError> {
        let mut table = self.table.write().await;
        let enrollment = table
            .rows
            .get_mut(&enrollment_id)
            .ok_or_else(|| EnrollmentRepositoryError::not_found(enrollment_id))?;
        if !enrollment.is_active() {
            return Err(EnrollmentRepositoryError::not_active(enrollment_id));
        }
        enrollment.status = EnrollmentStatus::Dropped;
        enrollment.dropped_at = Some(at);
        Ok(enrollment.clone())
    }

    async fn has_active(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<bool, EnrollmentRepositoryError> {
        Ok(self.table.read().await.has_active(student_id, course_id))
    }

    async fn list_for_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
        let table = self.table.read().await;
        let mut enrollments: Vec<Enrollment> = table
            .rows
            .values()
            .filter(|enrollment| enrollment.student_id == student_id)
            .cloned()
            .collect();
        enrollments.sort_by(|a, b| {
            b.enrolled_at
                .cmp(&a.enrolled_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(enrollments)
    }
}
