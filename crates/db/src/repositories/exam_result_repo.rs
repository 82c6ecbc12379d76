//! Repository for the `exam_results` table.

use sqlx::PgPool;
use studytrack_core::types::DbId;

use crate::models::exam_result::{CreateExamResult, ExamResult, ExamResultDetail};
use crate::repositories::SubjectRepo;

const COLUMNS: &str = "id, subject_id, score, max_score, date, notes, created_at, updated_at";

/// Provides CRUD and aggregate operations for exam results.
pub struct ExamResultRepo;

impl ExamResultRepo {
    /// Insert a new exam result, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateExamResult) -> Result<ExamResult, sqlx::Error> {
        let query = format!(
            "INSERT INTO exam_results (subject_id, score, max_score, date, notes) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ExamResult>(&query)
            .bind(input.subject_id)
            .bind(input.score)
            .bind(input.max_score)
            .bind(input.date)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// List all exam results, most recent date first, with subject and
    /// percentage.
    pub async fn list_detailed(pool: &PgPool) -> Result<Vec<ExamResultDetail>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM exam_results ORDER BY date DESC, id DESC");
        let exams = sqlx::query_as::<_, ExamResult>(&query).fetch_all(pool).await?;

        let subject_ids: Vec<DbId> = exams.iter().map(|e| e.subject_id).collect();
        let subjects = SubjectRepo::map_by_ids(pool, &subject_ids).await?;

        Ok(exams
            .into_iter()
            .filter_map(|exam| {
                let subject = subjects.get(&exam.subject_id)?.clone();
                Some(ExamResultDetail::new(exam, subject))
            })
            .collect())
    }

    /// Mean raw score across all results; `None` when there are none.
    pub async fn average_score(pool: &PgPool) -> Result<Option<f64>, sqlx::Error> {
        let row: (Option<f64>,) = sqlx::query_as("SELECT AVG(score) FROM exam_results")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Delete an exam result by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM exam_results WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
