//! Parent handlers.

use std::sync::Arc;

use async_trait::async_trait;

use super::{
    CreateParentCommand, DEFAULT_RELATIONSHIP, GetMyChildrenQuery, LinkParentToStudentCommand,
    Parent, ParentDraft, ParentLink,
};
use crate::domain::dispatch::{HandlerResult, IntentHandler, settle};
use crate::domain::identity::IdentityContext;
use crate::domain::ports::{ParentRepository, ParentRepositoryError, StudentRepository};
use crate::domain::students::{Student, StudentSort, student_not_found, student_storage_error};
use crate::domain::validation::{optional_text, positive_id};
use crate::domain::{Error, UserId};

fn parent_storage_error(error: ParentRepositoryError) -> Error {
    match error {
        ParentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("parent repository unavailable: {message}"))
        }
        ParentRepositoryError::Query { message } => {
            Error::internal(format!("parent repository error: {message}"))
        }
        ParentRepositoryError::DuplicateEmail { email } => {
            Error::conflict(format!("A parent with email {email} already exists"))
        }
        ParentRepositoryError::DuplicateLink {
            parent_id,
            student_id,
        } => Error::conflict(format!(
            "Parent {parent_id} is already linked to student {student_id}"
        )),
    }
}

/// Handles parent registration, linking and the parent's own view.
pub struct ParentService<P: ?Sized, S: ?Sized> {
    parents: Arc<P>,
    students: Arc<S>,
}

impl<P: ?Sized, S: ?Sized> ParentService<P, S> {
    /// Create a service over the parent and student repositories.
    pub fn new(parents: Arc<P>, students: Arc<S>) -> Self {
        Self { parents, students }
    }
}

impl<P, S> ParentService<P, S>
where
    P: ParentRepository + ?Sized,
    S: StudentRepository + ?Sized,
{
    async fn create(&self, command: CreateParentCommand) -> Result<Parent, Error> {
        let draft = ParentDraft::new(
            &command.first_name,
            &command.last_name,
            &command.email,
            command.phone.as_deref(),
            command.user_id,
        )?;
        self.parents
            .insert(&draft)
            .await
            .map_err(parent_storage_error)
    }

    async fn link(&self, command: LinkParentToStudentCommand) -> Result<ParentLink, Error> {
        let parent_id = positive_id("parentId", command.parent_id)?;
        let student_id = positive_id("studentId", command.student_id)?;

        self.parents
            .find_by_id(parent_id)
            .await
            .map_err(parent_storage_error)?
            .ok_or_else(|| Error::not_found(format!("Parent {parent_id} not found")))?;
        self.students
            .find_by_id(student_id)
            .await
            .map_err(student_storage_error)?
            .ok_or_else(|| student_not_found(student_id))?;

        let link = ParentLink {
            parent_id,
            student_id,
            relationship: optional_text(command.relationship.as_deref())
                .unwrap_or_else(|| DEFAULT_RELATIONSHIP.to_owned()),
        };
        self.parents
            .link(&link)
            .await
            .map_err(parent_storage_error)?;
        Ok(link)
    }

    async fn children_of(&self, user_id: &UserId) -> Result<Vec<Student>, Error> {
        let parent = self
            .parents
            .find_by_user_id(user_id)
            .await
            .map_err(parent_storage_error)?
            .ok_or_else(|| Error::not_found("No parent record is linked to this account"))?;
        let ids = self
            .parents
            .linked_student_ids(parent.id)
            .await
            .map_err(parent_storage_error)?;

        let mut children = Vec::with_capacity(ids.len());
        for id in ids {
            // A link can outlive a deleted student; skip the dangling entry.
            if let Some(student) = self
                .students
                .find_by_id(id)
                .await
                .map_err(student_storage_error)?
            {
                children.push(student);
            }
        }
        children.sort_by(|a, b| StudentSort::LastName.compare(a, b));
        Ok(children)
    }
}

#[async_trait]
impl<P, S> IntentHandler<CreateParentCommand> for ParentService<P, S>
where
    P: ParentRepository + ?Sized + 'static,
    S: StudentRepository + ?Sized + 'static,
{
    async fn handle(
        &self,
        intent: CreateParentCommand,
        _identity: &IdentityContext,
    ) -> HandlerResult<Parent> {
        settle(self.create(intent).await, "Parent created")
    }
}

#[async_trait]
impl<P, S> IntentHandler<LinkParentToStudentCommand> for ParentService<P, S>
where
    P: ParentRepository + ?Sized + 'static,
    S: StudentRepository + ?Sized + 'static,
{
    async fn handle(
        &self,
        intent: LinkParentToStudentCommand,
        _identity: &IdentityContext,
    ) -> HandlerResult<ParentLink> {
        settle(self.link(intent).await, "Parent linked to student")
    }
}

#[async_trait]
impl<P, S> IntentHandler<GetMyChildrenQuery> for ParentService<P, S>
where
    P: ParentRepository + ?Sized + 'static,
    S: StudentRepository + ?Sized + 'static,
{
    async fn handle(
        &self,
        _intent: GetMyChildrenQuery,
        identity: &IdentityContext,
    ) -> HandlerResult<Vec<Student>> {
        let outcome = match identity.require_user_id() {
            Ok(user_id) => self.children_of(user_id).await,
            Err(error) => Err(error),
        };
        settle(outcome, "Children retrieved")
    }
}
