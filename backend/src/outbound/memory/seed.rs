//! Demo data loaded into the in-memory store at start-up.
//!
//! Seeding goes through the same ports the handlers use, so the demo rows
//! obey the storage rules (unique emails, one active enrollment per course).

use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

use super::MemoryStore;
use crate::domain::categories::NewCategory;
use crate::domain::enrollment::NewEnrollment;
use crate::domain::identity::roles;
use crate::domain::parents::{DEFAULT_RELATIONSHIP, ParentDraft, ParentLink};
use crate::domain::ports::{
    CategoryRepository, CategoryRepositoryError, EnrollmentRepository,
    EnrollmentRepositoryError, ParentRepository, ParentRepositoryError, ProfileRepository,
    ProfileRepositoryError, StudentRepository, StudentRepositoryError,
};
use crate::domain::profiles::Profile;
use crate::domain::students::StudentDraft;
use crate::domain::{DisplayName, Error, UserId, UserValidationError};

/// Password shared by every demo account.
pub const DEMO_PASSWORD: &str = "demo-password";

struct DemoAccount {
    username: &'static str,
    user_id: &'static str,
    display_name: &'static str,
    role: &'static str,
}

const DEMO_ACCOUNTS: [DemoAccount; 4] = [
    DemoAccount {
        username: "admin",
        user_id: "123e4567-e89b-12d3-a456-426614174000",
        display_name: "Margaret Hamilton",
        role: roles::ADMIN,
    },
    DemoAccount {
        username: "teacher",
        user_id: "6f1c2b9e-3c1d-4b7a-9f0e-2d8a1c4e5b60",
        display_name: "Edsger Dijkstra",
        role: roles::TEACHER,
    },
    DemoAccount {
        username: "student",
        user_id: "0b8e4f2a-7d3c-4e19-a5b6-c1d2e3f4a5b6",
        display_name: "Ada Lovelace",
        role: roles::STUDENT,
    },
    DemoAccount {
        username: "parent",
        user_id: "9a7b6c5d-4e3f-4a1b-8c9d-0e1f2a3b4c5d",
        display_name: "Anne Byron",
        role: roles::PARENT,
    },
];

const DEMO_CATEGORIES: [(&str, &str); 3] = [
    ("Mathematics", "Arithmetic through calculus"),
    ("Science", "Physics, chemistry and biology"),
    ("Humanities", "History, languages and the arts"),
];

/// Errors raised while loading demo data.
#[derive(Debug, Error)]
pub enum DemoSeedError {
    /// A built-in identifier or display name failed validation.
    #[error("invalid demo identity: {0}")]
    Identity(#[from] UserValidationError),
    /// A built-in record failed domain validation.
    #[error("invalid demo record: {0}")]
    Record(#[from] Error),
    #[error(transparent)]
    Students(#[from] StudentRepositoryError),
    #[error(transparent)]
    Parents(#[from] ParentRepositoryError),
    #[error(transparent)]
    Enrollments(#[from] EnrollmentRepositoryError),
    #[error(transparent)]
    Categories(#[from] CategoryRepositoryError),
    #[error(transparent)]
    Profiles(#[from] ProfileRepositoryError),
}

/// Counts of the rows written by [`seed_demo_data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoSeedOutcome {
    pub accounts: usize,
    pub students: usize,
    pub categories: usize,
}

/// Load demo accounts, profiles, students, a parent link, an enrollment and
/// categories into `store`.
///
/// # Errors
/// Fails when the store already holds conflicting rows.
pub async fn seed_demo_data(
    store: &MemoryStore,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<DemoSeedOutcome, DemoSeedError> {
    for account in &DEMO_ACCOUNTS {
        let user_id = UserId::new(account.user_id)?;
        store
            .accounts
            .add_account(account.username, DEMO_PASSWORD, user_id.clone(), [account.role])
            .await;
        let profile = Profile {
            user_id,
            display_name: DisplayName::new(account.display_name)?,
            email: format!("{}@school.example", account.username),
            phone: None,
            bio: None,
            updated_at: now,
        };
        store.profiles.save(&profile).await?;
    }

    let student_user = UserId::new(DEMO_ACCOUNTS[2].user_id)?;
    let parent_user = UserId::new(DEMO_ACCOUNTS[3].user_id)?;

    let ada = store
        .students
        .insert(&StudentDraft::new(
            "Ada",
            "Lovelace",
            "ada.lovelace@school.example",
            NaiveDate::from_ymd_opt(2010, 12, 10),
            Some(student_user),
        )?)
        .await?;
    let others = [
        ("Alan", "Turing", "alan.turing@school.example"),
        ("Grace", "Hopper", "grace.hopper@school.example"),
    ];
    for (first, last, email) in others {
        store
            .students
            .insert(&StudentDraft::new(first, last, email, None, None)?)
            .await?;
    }

    let parent = store
        .parents
        .insert(&ParentDraft::new(
            "Anne",
            "Byron",
            "anne.byron@home.example",
            None,
            Some(parent_user),
        )?)
        .await?;
    store
        .parents
        .link(&ParentLink {
            parent_id: parent.id,
            student_id: ada.id,
            relationship: DEFAULT_RELATIONSHIP.to_owned(),
        })
        .await?;

    store
        .enrollments
        .insert_if_no_active(&NewEnrollment {
            student_id: ada.id,
            course_id: 101,
            semester: "2024-Fall".to_owned(),
            enrolled_at: now,
        })
        .await?;

    for (name, description) in DEMO_CATEGORIES {
        store
            .categories
            .insert(&NewCategory {
                name: name.to_owned(),
                description: Some(description.to_owned()),
            })
            .await?;
    }

    let outcome = DemoSeedOutcome {
        accounts: DEMO_ACCOUNTS.len(),
        students: others.len() + 1,
        categories: DEMO_CATEGORIES.len(),
    };
    info!(
        accounts = outcome.accounts,
        students = outcome.students,
        categories = outcome.categories,
        "demo data seeded"
    );
    Ok(outcome)
}
