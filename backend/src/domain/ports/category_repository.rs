//! Port abstraction for category storage adapters and their errors.

use async_trait::async_trait;

use crate::domain::categories::{Category, NewCategory};
use crate::domain::{PageRequest, Paged};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by category repository adapters.
    pub enum CategoryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "category repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "category repository query failed: {message}",
        /// A category with the same name, ignoring case, exists.
        DuplicateName { name: String } => "category name already in use: {name}",
    }
}

/// Storage for categories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Store a category unless its name is taken, ignoring case.
    async fn insert(&self, category: &NewCategory) -> Result<Category, CategoryRepositoryError>;

    /// One page of categories ordered by name, optionally filtered by a
    /// lower-cased name fragment.
    async fn list(
        &self,
        search: Option<String>,
        page: PageRequest,
    ) -> Result<Paged<Category>, CategoryRepositoryError>;
}
