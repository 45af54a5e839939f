//! In-memory `GradeRepository` adapter.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::grading::{Grade, NewGrade};
use crate::domain::ports::{GradeRepository, GradeRepositoryError};

/// Grades held in process memory, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryGradeRepository {
    rows: RwLock<Vec<Grade>>,
}

impl MemoryGradeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GradeRepository for MemoryGradeRepository {
    async fn insert(&self, grade: &NewGrade) -> Result<Grade, GradeRepositoryError> {
        let mut rows = self.rows.write().await;
        let id = i64::try_from(rows.len())
            .map_err(|err| GradeRepositoryError::query(err.to_string()))?
            + 1;
        let stored = grade.clone().into_grade(id);
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn list_for_student(
        &self,
        student_id: i64,
        course_id: Option<i64>,
    ) -> Result<Vec<Grade>, GradeRepositoryError> {
        let rows = self.rows.read().await;
        // Newest first.
        Ok(rows
            .iter()
            .rev()
            .filter(|grade| grade.student_id == student_id)
            .filter(|grade| course_id.is_none_or(|course| grade.course_id == course))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    //! Grade storage ordering and filtering.
    use super::*;
    use crate::domain::grading::Score;
    use crate::test_support::fixture_instant;
    use rstest::rstest;

    fn grade(student_id: i64, course_id: i64, score: f64) -> NewGrade {
        NewGrade {
            student_id,
            course_id,
            score: Score::new(score).expect("valid score"),
            comment: None,
            recorded_by: None,
            recorded_at: fixture_instant(),
        }
    }

    #[rstest]
    #[case(None, vec![3, 1])]
    #[case(Some(5), vec![1])]
    #[tokio::test]
    async fn lists_a_students_grades_newest_first(
        #[case] course_id: Option<i64>,
        #[case] expected: Vec<i64>,
    ) {
        let repo = MemoryGradeRepository::new();
        for new in [grade(1, 5, 91.0), grade(2, 5, 70.0), grade(1, 6, 55.0)] {
            repo.insert(&new).await.expect("insert");
        }
        let listed = repo
            .list_for_student(1, course_id)
            .await
            .expect("list");
        let ids: Vec<i64> = listed.iter().map(|g| g.id).collect();
        assert_eq!(ids, expected);
    }
}
