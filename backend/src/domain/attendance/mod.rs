//! Daily attendance marks.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::identity::roles;
use crate::domain::intent::{Access, impl_intent};
use crate::domain::{Error, PageQuery, Paged, UserId};

mod service;

pub use service::AttendanceService;

/// Attendance outcome for one student on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
            Self::Late => "Late",
            Self::Excused => "Excused",
        };
        f.write_str(label)
    }
}

impl FromStr for AttendanceStatus {
    type Err = Error;

    /// Parse a status name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            "late" => Ok(Self::Late),
            "excused" => Ok(Self::Excused),
            _ => Err(Error::invalid_request(format!(
                "status must be one of Present, Absent, Late, Excused; got {}",
                s.trim()
            ))),
        }
    }
}

/// A stored attendance mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_by: Option<UserId>,
}

/// Validated attendance mark awaiting an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendance {
    pub student_id: i64,
    pub course_id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub note: Option<String>,
    pub recorded_by: Option<UserId>,
}

impl NewAttendance {
    /// Materialise under a storage-assigned id.
    pub fn into_record(self, id: i64) -> AttendanceRecord {
        AttendanceRecord {
            id,
            student_id: self.student_id,
            course_id: self.course_id,
            date: self.date,
            status: self.status,
            note: self.note,
            recorded_by: self.recorded_by,
        }
    }
}

/// Selection applied when listing attendance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceFilter {
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
    /// Inclusive lower bound.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound.
    pub to: Option<NaiveDate>,
}

impl AttendanceFilter {
    /// Whether `record` falls inside the filter.
    pub fn matches(&self, record: &AttendanceRecord) -> bool {
        self.student_id.is_none_or(|id| record.student_id == id)
            && self.course_id.is_none_or(|id| record.course_id == id)
            && self.from.is_none_or(|from| record.date >= from)
            && self.to.is_none_or(|to| record.date <= to)
    }
}

/// Mark a student's attendance. `date` defaults to today.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceCommand {
    pub student_id: i64,
    pub course_id: i64,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub status: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// Attendance marks, newest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetAttendanceQuery {
    pub filter: AttendanceFilter,
    pub page: PageQuery,
}

impl_intent!(
    MarkAttendanceCommand => AttendanceRecord,
    Command,
    Access::AnyRole(&[roles::ADMIN, roles::TEACHER])
);
impl_intent!(
    GetAttendanceQuery => Paged<AttendanceRecord>,
    Query,
    Access::AnyRole(&[roles::ADMIN, roles::TEACHER])
);
