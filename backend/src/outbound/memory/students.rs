//! In-memory `StudentRepository` adapter.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{StudentRepository, StudentRepositoryError};
use crate::domain::students::{Student, StudentDraft, StudentFilter};
use crate::domain::{PageRequest, Paged, UserId};

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, Student>,
}

impl Table {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|student| Some(student.id) != except && student.email.eq_ignore_ascii_case(email))
    }
}

/// Student records held in process memory.
#[derive(Debug, Default)]
pub struct MemoryStudentRepository {
    table: RwLock<Table>,
}

impl MemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentRepository for MemoryStudentRepository {
    async fn insert(&self, draft: &StudentDraft) -> Result<Student, StudentRepositoryError> {
        let mut table = self.table.write().await;
        if table.email_taken(&draft.email, None) {
            return Err(StudentRepositoryError::duplicate_email(draft.email.as_str()));
        }
        table.last_id += 1;
        let student = draft.clone().into_student(table.last_id);
        table.rows.insert(student.id, student.clone());
        Ok(student)
    }

    async fn update(
        &self,
        id: i64,
        draft: &StudentDraft,
    ) -> Result<Option<Student>, StudentRepositoryError> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&id) {
            return Ok(None);
        }
        if table.email_taken(&draft.email, Some(id)) {
            return Err(StudentRepositoryError::duplicate_email(draft.email.as_str()));
        }
        let student = draft.clone().into_student(id);
        table.rows.insert(id, student.clone());
        Ok(Some(student))
    }

    async fn delete(&self, id: i64) -> Result<bool, StudentRepositoryError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, StudentRepositoryError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Student>, StudentRepositoryError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .find(|student| student.user_id.as_ref() == Some(user_id))
            .cloned())
    }

    async fn list(
        &self,
        filter: &StudentFilter,
        page: PageRequest,
    ) -> Result<Paged<Student>, StudentRepositoryError> {
        let table = self.table.read().await;
        let mut matching: Vec<Student> = table
            .rows
            .values()
            .filter(|student| filter.matches(student))
            .cloned()
            .collect();
        matching.sort_by(|a, b| filter.sort.compare(a, b));
        Ok(Paged::from_window(page, matching))
    }
}
