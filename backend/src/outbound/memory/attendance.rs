//! In-memory `AttendanceRepository` adapter.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::attendance::{AttendanceFilter, AttendanceRecord, NewAttendance};
use crate::domain::ports::{AttendanceRepository, AttendanceRepositoryError};
use crate::domain::{PageRequest, Paged};

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, AttendanceRecord>,
}

/// Attendance marks held in process memory.
#[derive(Debug, Default)]
pub struct MemoryAttendanceRepository {
    table: RwLock<Table>,
}

impl MemoryAttendanceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttendanceRepository for MemoryAttendanceRepository {
    async fn insert(
        &self,
        record: &NewAttendance,
    ) -> Result<AttendanceRecord, AttendanceRepositoryError> {
        let mut table = self.table.write().await;
        let already_marked = table.rows.values().any(|existing| {
            existing.student_id == record.student_id
                && existing.course_id == record.course_id
                && existing.date == record.date
        });
        if already_marked {
            return Err(AttendanceRepositoryError::already_marked(
                record.student_id,
                record.course_id,
                record.date,
            ));
        }
        table.last_id += 1;
        let stored = record.clone().into_record(table.last_id);
        table.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn list(
        &self,
        filter: &AttendanceFilter,
        page: PageRequest,
    ) -> Result<Paged<AttendanceRecord>, AttendanceRepositoryError> {
        let table = self.table.read().await;
        let mut matching: Vec<AttendanceRecord> = table
            .rows
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        Ok(Paged::from_window(page, matching))
    }
}
