//! Port abstraction for student storage adapters and their errors.

use async_trait::async_trait;

use crate::domain::students::{Student, StudentDraft, StudentFilter};
use crate::domain::{PageRequest, Paged, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by student repository adapters.
    pub enum StudentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "student repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "student repository query failed: {message}",
        /// Another student already uses the email address.
        DuplicateEmail { email: String } => "student email already registered: {email}",
    }
}

/// Storage for student records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Store a new student and return it with its assigned id.
    async fn insert(&self, draft: &StudentDraft) -> Result<Student, StudentRepositoryError>;

    /// Replace the details of student `id`; `None` when it does not exist.
    async fn update(
        &self,
        id: i64,
        draft: &StudentDraft,
    ) -> Result<Option<Student>, StudentRepositoryError>;

    /// Remove student `id`, reporting whether it existed.
    async fn delete(&self, id: i64) -> Result<bool, StudentRepositoryError>;

    /// Fetch a student by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, StudentRepositoryError>;

    /// Fetch the student linked to a login account.
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Student>, StudentRepositoryError>;

    /// Return one page of students matching `filter`, in its sort order.
    async fn list(
        &self,
        filter: &StudentFilter,
        page: PageRequest,
    ) -> Result<Paged<Student>, StudentRepositoryError>;
}
