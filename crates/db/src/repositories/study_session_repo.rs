//! Repository for the `study_sessions` table.

use sqlx::PgPool;
use studytrack_core::types::{DbId, Timestamp};

use crate::models::study_session::{CreateStudySession, StudySession, StudySessionDetail};
use crate::repositories::{LessonPlanRepo, SubjectRepo};

const COLUMNS: &str = "id, subject_id, lesson_plan_id, topic, start_time, end_time, \
     is_review, notes, created_at, updated_at";

/// Provides CRUD operations for study sessions.
pub struct StudySessionRepo;

impl StudySessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateStudySession,
    ) -> Result<StudySession, sqlx::Error> {
        let query = format!(
            "INSERT INTO study_sessions \
                (subject_id, lesson_plan_id, topic, start_time, end_time, is_review, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StudySession>(&query)
            .bind(input.subject_id)
            .bind(input.lesson_plan_id)
            .bind(&input.topic)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.is_review)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Attach subject and lesson plan to a batch of sessions, dropping any
    /// whose subject has vanished in between.
    pub async fn enrich(
        pool: &PgPool,
        sessions: Vec<StudySession>,
    ) -> Result<Vec<StudySessionDetail>, sqlx::Error> {
        let subject_ids: Vec<DbId> = sessions.iter().map(|s| s.subject_id).collect();
        let lesson_ids: Vec<DbId> = sessions.iter().filter_map(|s| s.lesson_plan_id).collect();

        let subjects = SubjectRepo::map_by_ids(pool, &subject_ids).await?;
        let lessons = LessonPlanRepo::map_by_ids(pool, &lesson_ids).await?;

        Ok(sessions
            .into_iter()
            .filter_map(|session| {
                let subject = subjects.get(&session.subject_id)?.clone();
                let lesson_plan = session
                    .lesson_plan_id
                    .and_then(|id| lessons.get(&id).cloned());
                Some(StudySessionDetail {
                    session,
                    subject,
                    lesson_plan,
                })
            })
            .collect())
    }

    /// List all sessions, most recent start first, with relations.
    pub async fn list_detailed(pool: &PgPool) -> Result<Vec<StudySessionDetail>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM study_sessions ORDER BY start_time DESC, id DESC");
        let sessions = sqlx::query_as::<_, StudySession>(&query)
            .fetch_all(pool)
            .await?;
        Self::enrich(pool, sessions).await
    }

    /// Start and end of every session, for duration totals.
    pub async fn list_windows(pool: &PgPool) -> Result<Vec<(Timestamp, Timestamp)>, sqlx::Error> {
        sqlx::query_as("SELECT start_time, end_time FROM study_sessions")
            .fetch_all(pool)
            .await
    }

    /// Delete a session by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM study_sessions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
