//! Port abstraction for parent storage and parent/student links.

use async_trait::async_trait;

use crate::domain::UserId;
use crate::domain::parents::{Parent, ParentDraft, ParentLink};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by parent repository adapters.
    pub enum ParentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "parent repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "parent repository query failed: {message}",
        /// Another parent already uses the email address.
        DuplicateEmail { email: String } => "parent email already registered: {email}",
        /// The parent is already linked to the student.
        DuplicateLink { parent_id: i64, student_id: i64 } =>
            "parent {parent_id} already linked to student {student_id}",
    }
}

/// Storage for parents and their links to students.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParentRepository: Send + Sync {
    /// Store a new parent and return it with its assigned id.
    async fn insert(&self, draft: &ParentDraft) -> Result<Parent, ParentRepositoryError>;

    /// Fetch a parent by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Parent>, ParentRepositoryError>;

    /// Fetch the parent linked to a login account.
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Parent>, ParentRepositoryError>;

    /// Record a link, rejecting duplicates atomically.
    async fn link(&self, link: &ParentLink) -> Result<(), ParentRepositoryError>;

    /// Ids of students linked to `parent_id`, in link order.
    async fn linked_student_ids(&self, parent_id: i64) -> Result<Vec<i64>, ParentRepositoryError>;
}
