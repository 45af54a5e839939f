//! Grades recorded against course enrollments.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::identity::roles;
use crate::domain::intent::{Access, impl_intent};
use crate::domain::{Error, UserId};

mod service;

pub use service::GradingService;

/// Lowest permitted score.
pub const MIN_SCORE: f64 = 0.0;
/// Highest permitted score.
pub const MAX_SCORE: f64 = 100.0;

/// Letter band derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    /// Band a validated score: A from 90, B from 80, C from 70, D from 60.
    ///
    /// # Examples
    /// ```
    /// use school_backend::domain::grading::LetterGrade;
    ///
    /// assert_eq!(LetterGrade::from_score(89.5), LetterGrade::B);
    /// assert_eq!(LetterGrade::from_score(90.0), LetterGrade::A);
    /// ```
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => Self::A,
            s if s >= 80.0 => Self::B,
            s if s >= 70.0 => Self::C,
            s if s >= 60.0 => Self::D,
            _ => Self::F,
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        };
        f.write_str(letter)
    }
}

/// Score on the 0 to 100 scale.
///
/// ## Invariants
/// - finite and within [`MIN_SCORE`]..=[`MAX_SCORE`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    /// Validate a raw score.
    pub fn new(value: f64) -> Result<Self, Error> {
        if !value.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&value) {
            return Err(Error::invalid_request(format!(
                "score must be between {MIN_SCORE} and {MAX_SCORE}"
            )));
        }
        Ok(Self(value))
    }

    /// Raw value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Letter band for this score.
    pub fn letter(self) -> LetterGrade {
        LetterGrade::from_score(self.0)
    }
}

/// A recorded grade.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub score: Score,
    pub letter: LetterGrade,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_by: Option<UserId>,
    pub recorded_at: DateTime<Utc>,
}

/// Validated grade awaiting an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGrade {
    pub student_id: i64,
    pub course_id: i64,
    pub score: Score,
    pub comment: Option<String>,
    pub recorded_by: Option<UserId>,
    pub recorded_at: DateTime<Utc>,
}

impl NewGrade {
    /// Materialise under a storage-assigned id.
    pub fn into_grade(self, id: i64) -> Grade {
        Grade {
            id,
            student_id: self.student_id,
            course_id: self.course_id,
            score: self.score,
            letter: self.score.letter(),
            comment: self.comment,
            recorded_by: self.recorded_by,
            recorded_at: self.recorded_at,
        }
    }
}

/// Record a grade for an enrolled student.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordGradeCommand {
    pub student_id: i64,
    pub course_id: i64,
    pub score: f64,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Grades for one student, optionally limited to a course.
#[derive(Debug, Clone, Copy)]
pub struct GetStudentGradesQuery {
    pub student_id: i64,
    pub course_id: Option<i64>,
}

/// Grades for the calling student.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetMyGradesQuery {
    pub course_id: Option<i64>,
}

impl_intent!(
    RecordGradeCommand => Grade,
    Command,
    Access::AnyRole(&[roles::ADMIN, roles::TEACHER])
);
impl_intent!(
    GetStudentGradesQuery => Vec<Grade>,
    Query,
    Access::AnyRole(&[roles::ADMIN, roles::TEACHER])
);
impl_intent!(GetMyGradesQuery => Vec<Grade>, Query, Access::AnyRole(&[roles::STUDENT]));

#[cfg(test)]
mod tests;
