//! Port abstraction for grade storage adapters and their errors.

use async_trait::async_trait;

use crate::domain::grading::{Grade, NewGrade};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by grade repository adapters.
    pub enum GradeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "grade repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "grade repository query failed: {message}",
    }
}

/// Storage for grades.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GradeRepository: Send + Sync {
    /// Store a grade and return it with its assigned id.
    async fn insert(&self, grade: &NewGrade) -> Result<Grade, GradeRepositoryError>;

    /// Grades for `student_id`, newest first, optionally limited to a course.
    async fn list_for_student(
        &self,
        student_id: i64,
        course_id: Option<i64>,
    ) -> Result<Vec<Grade>, GradeRepositoryError>;
}
