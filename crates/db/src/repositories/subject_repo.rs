//! Repository for the `subjects` table.

use std::collections::HashMap;

use sqlx::PgPool;
use studytrack_core::study::DEFAULT_SUBJECT_COLOR;
use studytrack_core::types::DbId;

use crate::models::lesson_plan::LessonPlan;
use crate::models::subject::{Subject, SubjectDetail, SubjectInput};
use crate::repositories::{lesson_plan_repo, CourseRepo};

pub(crate) const COLUMNS: &str =
    "id, name, description, color, course_id, created_at, updated_at";

/// Provides CRUD operations for subjects.
pub struct SubjectRepo;

impl SubjectRepo {
    /// Insert a new subject, returning the created row. A missing colour
    /// falls back to [`DEFAULT_SUBJECT_COLOR`].
    pub async fn create(pool: &PgPool, input: &SubjectInput) -> Result<Subject, sqlx::Error> {
        let query = format!(
            "INSERT INTO subjects (name, description, color, course_id) \
             VALUES ($1, $2, COALESCE($3, $4), $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subject>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.color)
            .bind(DEFAULT_SUBJECT_COLOR)
            .bind(input.course_id)
            .fetch_one(pool)
            .await
    }

    /// Replace a subject's fields. A missing colour keeps the current one.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &SubjectInput,
    ) -> Result<Option<Subject>, sqlx::Error> {
        let query = format!(
            "UPDATE subjects SET \
                name = $2, \
                description = $3, \
                color = COALESCE($4, color), \
                course_id = $5 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subject>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.color)
            .bind(input.course_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a subject by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Subject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subjects WHERE id = $1");
        sqlx::query_as::<_, Subject>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load subjects for the given IDs, keyed by ID.
    pub async fn map_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<HashMap<DbId, Subject>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let query = format!("SELECT {COLUMNS} FROM subjects WHERE id = ANY($1)");
        let rows = sqlx::query_as::<_, Subject>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|s| (s.id, s)).collect())
    }

    /// List all subjects by name, each with its course and lesson plans.
    pub async fn list_detailed(pool: &PgPool) -> Result<Vec<SubjectDetail>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subjects ORDER BY name ASC");
        let subjects = sqlx::query_as::<_, Subject>(&query).fetch_all(pool).await?;

        let ids: Vec<DbId> = subjects.iter().map(|s| s.id).collect();
        let mut course_ids: Vec<DbId> = subjects.iter().filter_map(|s| s.course_id).collect();
        course_ids.sort_unstable();
        course_ids.dedup();

        let courses = CourseRepo::map_by_ids(pool, &course_ids).await?;

        let lesson_query = format!(
            "SELECT {} FROM lesson_plans WHERE subject_id = ANY($1) \
             ORDER BY planned_date ASC, id ASC",
            lesson_plan_repo::COLUMNS
        );
        let lessons = sqlx::query_as::<_, LessonPlan>(&lesson_query)
            .bind(&ids)
            .fetch_all(pool)
            .await?;
        let mut by_subject: HashMap<DbId, Vec<LessonPlan>> = HashMap::new();
        for lesson in lessons {
            by_subject.entry(lesson.subject_id).or_default().push(lesson);
        }

        Ok(subjects
            .into_iter()
            .map(|subject| SubjectDetail {
                course: subject.course_id.and_then(|id| courses.get(&id).cloned()),
                lesson_plans: by_subject.remove(&subject.id).unwrap_or_default(),
                subject,
            })
            .collect())
    }

    /// Delete a subject and, by cascade, its lessons, sessions, and exam
    /// results. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
