//! Student records and the intents that manage them.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::identity::roles;
use crate::domain::intent::{Access, impl_intent};
use crate::domain::validation::{email, required_text};
use crate::domain::{Error, PageQuery, Paged, UserId};

mod service;

pub use service::StudentService;
pub(crate) use service::{student_not_found, student_storage_error};

/// A student known to the school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    /// Login account linked to the student, when they have one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

impl Student {
    /// "First Last" as shown on rosters.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Validated student fields ready for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: Option<NaiveDate>,
    pub user_id: Option<UserId>,
}

impl StudentDraft {
    /// Validate raw fields.
    ///
    /// Names are trimmed and must be non-empty; the email is lower-cased and
    /// must contain a local part and a domain.
    ///
    /// # Examples
    /// ```
    /// use school_backend::domain::students::StudentDraft;
    ///
    /// let draft = StudentDraft::new(" Ada ", "Lovelace", "ADA@school.example", None, None)
    ///     .expect("valid student");
    /// assert_eq!(draft.email, "ada@school.example");
    /// assert!(StudentDraft::new("", "Lovelace", "ada@school.example", None, None).is_err());
    /// ```
    pub fn new(
        first_name: &str,
        last_name: &str,
        email_address: &str,
        date_of_birth: Option<NaiveDate>,
        user_id: Option<UserId>,
    ) -> Result<Self, Error> {
        Ok(Self {
            first_name: required_text("firstName", first_name)?,
            last_name: required_text("lastName", last_name)?,
            email: email("email", email_address)?,
            date_of_birth,
            user_id,
        })
    }

    /// Materialise the draft under a storage-assigned id.
    pub fn into_student(self, id: i64) -> Student {
        Student {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            date_of_birth: self.date_of_birth,
            user_id: self.user_id,
        }
    }
}

/// Sort orders accepted by [`GetStudentsQuery`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum StudentSort {
    #[default]
    LastName,
    FirstName,
    Email,
    Id,
}

impl StudentSort {
    /// Compare two students under this order, breaking ties by id.
    pub fn compare(self, a: &Student, b: &Student) -> Ordering {
        let primary = match self {
            Self::LastName => a
                .last_name
                .to_lowercase()
                .cmp(&b.last_name.to_lowercase())
                .then_with(|| a.first_name.to_lowercase().cmp(&b.first_name.to_lowercase())),
            Self::FirstName => a
                .first_name
                .to_lowercase()
                .cmp(&b.first_name.to_lowercase())
                .then_with(|| a.last_name.to_lowercase().cmp(&b.last_name.to_lowercase())),
            Self::Email => a.email.cmp(&b.email),
            Self::Id => Ordering::Equal,
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

impl FromStr for StudentSort {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('_', "").to_lowercase().as_str() {
            "lastname" => Ok(Self::LastName),
            "firstname" => Ok(Self::FirstName),
            "email" => Ok(Self::Email),
            "id" => Ok(Self::Id),
            _ => Err(Error::invalid_request(format!(
                "sort must be one of lastName, firstName, email, id; got {s}"
            ))),
        }
    }
}

impl TryFrom<String> for StudentSort {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Search and ordering applied when listing students.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    /// Lower-cased fragment matched against names and email.
    pub search: Option<String>,
    pub sort: StudentSort,
}

impl StudentFilter {
    /// Build a filter, normalising blank searches to none.
    pub fn new(search: Option<&str>, sort: StudentSort) -> Self {
        let search = search
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase);
        Self { search, sort }
    }

    /// Whether `student` matches the search term.
    pub fn matches(&self, student: &Student) -> bool {
        self.search.as_deref().is_none_or(|term| {
            student.first_name.to_lowercase().contains(term)
                || student.last_name.to_lowercase().contains(term)
                || student.email.contains(term)
        })
    }
}

/// Register a new student.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentCommand {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub user_id: Option<UserId>,
}

/// Replace a student's details.
#[derive(Debug, Clone)]
pub struct UpdateStudentCommand {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: Option<NaiveDate>,
}

/// Remove a student.
#[derive(Debug, Clone, Copy)]
pub struct DeleteStudentCommand {
    pub id: i64,
}

/// Fetch one student.
#[derive(Debug, Clone, Copy)]
pub struct GetStudentByIdQuery {
    pub id: i64,
}

/// List students a page at a time.
#[derive(Debug, Clone, Default)]
pub struct GetStudentsQuery {
    pub page: PageQuery,
    pub search: Option<String>,
    pub sort: StudentSort,
}

impl_intent!(CreateStudentCommand => Student, Command, Access::AnyRole(&[roles::ADMIN]));
impl_intent!(UpdateStudentCommand => Student, Command, Access::AnyRole(&[roles::ADMIN]));
impl_intent!(DeleteStudentCommand => i64, Command, Access::AnyRole(&[roles::ADMIN]));
impl_intent!(
    GetStudentByIdQuery => Student,
    Query,
    Access::AnyRole(&[roles::ADMIN, roles::TEACHER])
);
impl_intent!(
    GetStudentsQuery => Paged<Student>,
    Query,
    Access::AnyRole(&[roles::ADMIN, roles::TEACHER])
);
