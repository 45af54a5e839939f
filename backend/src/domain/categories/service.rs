//! Category handlers.

use std::sync::Arc;

use async_trait::async_trait;

use super::{Category, CreateCategoryCommand, GetCategoriesQuery, NewCategory};
use crate::domain::dispatch::{HandlerResult, IntentHandler, settle};
use crate::domain::identity::IdentityContext;
use crate::domain::ports::{CategoryRepository, CategoryRepositoryError};
use crate::domain::validation::{optional_text, required_text};
use crate::domain::{Error, PageLimits, Paged};

fn category_storage_error(error: CategoryRepositoryError) -> Error {
    match error {
        CategoryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("category repository unavailable: {message}"))
        }
        CategoryRepositoryError::Query { message } => {
            Error::internal(format!("category repository error: {message}"))
        }
        CategoryRepositoryError::DuplicateName { name } => {
            Error::conflict(format!("A category named {name} already exists"))
        }
    }
}

/// Handles category creation and listing.
pub struct CategoryService<R: ?Sized> {
    categories: Arc<R>,
    limits: PageLimits,
}

impl<R: ?Sized> CategoryService<R> {
    /// Create a service over `categories`.
    pub fn new(categories: Arc<R>, limits: PageLimits) -> Self {
        Self { categories, limits }
    }
}

impl<R> CategoryService<R>
where
    R: CategoryRepository + ?Sized,
{
    async fn create(&self, command: CreateCategoryCommand) -> Result<Category, Error> {
        let category = NewCategory {
            name: required_text("name", &command.name)?,
            description: optional_text(command.description.as_deref()),
        };
        self.categories
            .insert(&category)
            .await
            .map_err(category_storage_error)
    }

    async fn list(&self, query: GetCategoriesQuery) -> Result<Paged<Category>, Error> {
        let search = optional_text(query.search.as_deref()).map(|term| term.to_lowercase());
        self.categories
            .list(search, query.page.resolve(self.limits))
            .await
            .map_err(category_storage_error)
    }
}

#[async_trait]
impl<R> IntentHandler<CreateCategoryCommand> for CategoryService<R>
where
    R: CategoryRepository + ?Sized + 'static,
{
    async fn handle(
        &self,
        intent: CreateCategoryCommand,
        _identity: &IdentityContext,
    ) -> HandlerResult<Category> {
        settle(self.create(intent).await, "Category created")
    }
}

#[async_trait]
impl<R> IntentHandler<GetCategoriesQuery> for CategoryService<R>
where
    R: CategoryRepository + ?Sized + 'static,
{
    async fn handle(
        &self,
        intent: GetCategoriesQuery,
        _identity: &IdentityContext,
    ) -> HandlerResult<Paged<Category>> {
        settle(self.list(intent).await, "Categories retrieved")
    }
}
