//! Student handlers.

use std::sync::Arc;

use async_trait::async_trait;

use super::{
    CreateStudentCommand, DeleteStudentCommand, GetStudentByIdQuery, GetStudentsQuery, Student,
    StudentDraft, StudentFilter, UpdateStudentCommand,
};
use crate::domain::dispatch::{HandlerResult, IntentHandler, settle};
use crate::domain::identity::IdentityContext;
use crate::domain::ports::{StudentRepository, StudentRepositoryError};
use crate::domain::validation::positive_id;
use crate::domain::{Error, PageLimits, Paged};

/// Map student storage failures onto domain errors.
pub(crate) fn student_storage_error(error: StudentRepositoryError) -> Error {
    match error {
        StudentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("student repository unavailable: {message}"))
        }
        StudentRepositoryError::Query { message } => {
            Error::internal(format!("student repository error: {message}"))
        }
        StudentRepositoryError::DuplicateEmail { email } => {
            Error::conflict(format!("A student with email {email} already exists"))
        }
    }
}

pub(crate) fn student_not_found(id: i64) -> Error {
    Error::not_found(format!("Student {id} not found"))
}

/// Handles every student intent.
pub struct StudentService<R: ?Sized> {
    students: Arc<R>,
    limits: PageLimits,
}

impl<R: ?Sized> StudentService<R> {
    /// Create a service over `students`, paging with `limits`.
    pub fn new(students: Arc<R>, limits: PageLimits) -> Self {
        Self { students, limits }
    }
}

impl<R> StudentService<R>
where
    R: StudentRepository + ?Sized,
{
    async fn create(&self, command: CreateStudentCommand) -> Result<Student, Error> {
        let draft = StudentDraft::new(
            &command.first_name,
            &command.last_name,
            &command.email,
            command.date_of_birth,
            command.user_id,
        )?;
        self.students
            .insert(&draft)
            .await
            .map_err(student_storage_error)
    }

    async fn update(&self, command: UpdateStudentCommand) -> Result<Student, Error> {
        let id = positive_id("id", command.id)?;
        let existing = self.find(id).await?;
        let draft = StudentDraft::new(
            &command.first_name,
            &command.last_name,
            &command.email,
            command.date_of_birth,
            existing.user_id,
        )?;
        self.students
            .update(id, &draft)
            .await
            .map_err(student_storage_error)?
            .ok_or_else(|| student_not_found(id))
    }

    async fn delete(&self, command: DeleteStudentCommand) -> Result<i64, Error> {
        let id = positive_id("id", command.id)?;
        let removed = self
            .students
            .delete(id)
            .await
            .map_err(student_storage_error)?;
        if removed {
            Ok(id)
        } else {
            Err(student_not_found(id))
        }
    }

    async fn find(&self, id: i64) -> Result<Student, Error> {
        self.students
            .find_by_id(id)
            .await
            .map_err(student_storage_error)?
            .ok_or_else(|| student_not_found(id))
    }

    async fn list(&self, query: GetStudentsQuery) -> Result<Paged<Student>, Error> {
        let page = query.page.resolve(self.limits);
        let filter = StudentFilter::new(query.search.as_deref(), query.sort);
        self.students
            .list(&filter, page)
            .await
            .map_err(student_storage_error)
    }
}

#[async_trait]
impl<R> IntentHandler<CreateStudentCommand> for StudentService<R>
where
    R: StudentRepository + ?Sized + 'static,
{
    async fn handle(
        &self,
        intent: CreateStudentCommand,
        _identity: &IdentityContext,
    ) -> HandlerResult<Student> {
        settle(self.create(intent).await, "Student created")
    }
}

#[async_trait]
impl<R> IntentHandler<UpdateStudentCommand> for StudentService<R>
where
    R: StudentRepository + ?Sized + 'static,
{
    async fn handle(
        &self,
        intent: UpdateStudentCommand,
        _identity: &IdentityContext,
    ) -> HandlerResult<Student> {
        settle(self.update(intent).await, "Student updated")
    }
}

#[async_trait]
impl<R> IntentHandler<DeleteStudentCommand> for StudentService<R>
where
    R: StudentRepository + ?Sized + 'static,
{
    async fn handle(
        &self,
        intent: DeleteStudentCommand,
        _identity: &IdentityContext,
    ) -> HandlerResult<i64> {
        settle(self.delete(intent).await, "Student deleted")
    }
}

#[async_trait]
impl<R> IntentHandler<GetStudentByIdQuery> for StudentService<R>
where
    R: StudentRepository + ?Sized + 'static,
{
    async fn handle(
        &self,
        intent: GetStudentByIdQuery,
        _identity: &IdentityContext,
    ) -> HandlerResult<Student> {
        let outcome = match positive_id("id", intent.id) {
            Ok(id) => self.find(id).await,
            Err(error) => Err(error),
        };
        settle(outcome, "Student found")
    }
}

#[async_trait]
impl<R> IntentHandler<GetStudentsQuery> for StudentService<R>
where
    R: StudentRepository + ?Sized + 'static,
{
    async fn handle(
        &self,
        intent: GetStudentsQuery,
        _identity: &IdentityContext,
    ) -> HandlerResult<Paged<Student>> {
        settle(self.list(intent).await, "Students retrieved")
    }
}
