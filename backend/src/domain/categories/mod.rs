//! Course categories.

use serde::{Deserialize, Serialize};

use crate::domain::identity::roles;
use crate::domain::intent::{Access, impl_intent};
use crate::domain::{PageQuery, Paged};

mod service;

pub use service::CategoryService;

/// A named grouping of courses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Validated category awaiting an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

impl NewCategory {
    /// Materialise under a storage-assigned id.
    pub fn into_category(self, id: i64) -> Category {
        Category {
            id,
            name: self.name,
            description: self.description,
        }
    }
}

/// Create a category. Names are unique ignoring case.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryCommand {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Categories ordered by name.
#[derive(Debug, Clone, Default)]
pub struct GetCategoriesQuery {
    pub search: Option<String>,
    pub page: PageQuery,
}

impl_intent!(CreateCategoryCommand => Category, Command, Access::AnyRole(&[roles::ADMIN]));
impl_intent!(GetCategoriesQuery => Paged<Category>, Query, Access::Authenticated);
