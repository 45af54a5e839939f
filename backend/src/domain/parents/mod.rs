//! Parents, guardians and their links to students.

use serde::{Deserialize, Serialize};

use crate::domain::identity::roles;
use crate::domain::intent::{Access, impl_intent};
use crate::domain::students::Student;
use crate::domain::validation::{email, optional_text, required_text};
use crate::domain::{Error, UserId};

mod service;

pub use service::ParentService;

/// Relationship recorded when a link does not name one.
pub const DEFAULT_RELATIONSHIP: &str = "Guardian";

/// A parent or guardian.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parent {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

/// Validated parent fields ready for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub user_id: Option<UserId>,
}

impl ParentDraft {
    /// Validate raw fields with the same rules as students.
    pub fn new(
        first_name: &str,
        last_name: &str,
        email_address: &str,
        phone: Option<&str>,
        user_id: Option<UserId>,
    ) -> Result<Self, Error> {
        Ok(Self {
            first_name: required_text("firstName", first_name)?,
            last_name: required_text("lastName", last_name)?,
            email: email("email", email_address)?,
            phone: optional_text(phone),
            user_id,
        })
    }

    /// Materialise the draft under a storage-assigned id.
    pub fn into_parent(self, id: i64) -> Parent {
        Parent {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            user_id: self.user_id,
        }
    }
}

/// Association between a parent and a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentLink {
    pub parent_id: i64,
    pub student_id: i64,
    pub relationship: String,
}

/// Register a parent or guardian.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParentCommand {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub user_id: Option<UserId>,
}

/// Link a parent to a student.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkParentToStudentCommand {
    pub parent_id: i64,
    pub student_id: i64,
    #[serde(default)]
    pub relationship: Option<String>,
}

/// Students linked to the calling parent.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetMyChildrenQuery;

impl_intent!(CreateParentCommand => Parent, Command, Access::AnyRole(&[roles::ADMIN]));
impl_intent!(LinkParentToStudentCommand => ParentLink, Command, Access::AnyRole(&[roles::ADMIN]));
impl_intent!(GetMyChildrenQuery => Vec<Student>, Query, Access::AnyRole(&[roles::PARENT]));

#[cfg(test)]
mod tests;
