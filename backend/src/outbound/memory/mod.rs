//! In-memory adapters for every driven port.
//!
//! Each repository guards its rows with a `tokio::sync::RwLock`; conflict
//! checks and the writes they protect run under one write guard.

mod accounts;
mod attendance;
mod categories;
mod enrollments;
mod grades;
mod notifications;
mod parents;
mod profiles;
mod seed;
mod students;

use std::sync::Arc;

use mockable::Clock;

use crate::domain::registration::SchoolPorts;

pub use accounts::MemoryAccountDirectory;
pub use attendance::MemoryAttendanceRepository;
pub use categories::MemoryCategoryRepository;
pub use enrollments::MemoryEnrollmentRepository;
pub use grades::MemoryGradeRepository;
pub use notifications::MemoryNotificationRepository;
pub use parents::MemoryParentRepository;
pub use profiles::MemoryProfileRepository;
pub use seed::{DEMO_PASSWORD, DemoSeedError, DemoSeedOutcome, seed_demo_data};
pub use students::MemoryStudentRepository;

/// One instance of every in-memory adapter.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub students: Arc<MemoryStudentRepository>,
    pub parents: Arc<MemoryParentRepository>,
    pub enrollments: Arc<MemoryEnrollmentRepository>,
    pub grades: Arc<MemoryGradeRepository>,
    pub attendance: Arc<MemoryAttendanceRepository>,
    pub categories: Arc<MemoryCategoryRepository>,
    pub notifications: Arc<MemoryNotificationRepository>,
    pub profiles: Arc<MemoryProfileRepository>,
    pub accounts: Arc<MemoryAccountDirectory>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Driven ports backed by this store.
    pub fn ports(&self, clock: Arc<dyn Clock>) -> SchoolPorts {
        SchoolPorts {
            students: self.students.clone(),
            parents: self.parents.clone(),
            enrollments: self.enrollments.clone(),
            grades: self.grades.clone(),
            attendance: self.attendance.clone(),
            categories: self.categories.clone(),
            notifications: self.notifications.clone(),
            profiles: self.profiles.clone(),
            clock,
        }
    }
}
