//! Repository for the `courses` table.

use std::collections::HashMap;

use sqlx::PgPool;
use studytrack_core::types::DbId;

use crate::models::course::{Course, CourseWithSubjects, CreateCourse};
use crate::models::subject::Subject;
use crate::repositories::subject_repo;

const COLUMNS: &str = "id, name, description, created_at, updated_at";

/// Provides CRUD operations for courses.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a new course, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses (name, description) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a course by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load courses for the given IDs, keyed by ID.
    pub async fn map_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<HashMap<DbId, Course>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = ANY($1)");
        let rows = sqlx::query_as::<_, Course>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|c| (c.id, c)).collect())
    }

    /// List all courses by name, each with its subjects (also by name).
    pub async fn list_with_subjects(pool: &PgPool) -> Result<Vec<CourseWithSubjects>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses ORDER BY name ASC, id ASC");
        let courses = sqlx::query_as::<_, Course>(&query).fetch_all(pool).await?;

        let ids: Vec<DbId> = courses.iter().map(|c| c.id).collect();
        let subject_query = format!(
            "SELECT {} FROM subjects WHERE course_id = ANY($1) ORDER BY name ASC",
            subject_repo::COLUMNS
        );
        let subjects = sqlx::query_as::<_, Subject>(&subject_query)
            .bind(&ids)
            .fetch_all(pool)
            .await?;

        let mut by_course: HashMap<DbId, Vec<Subject>> = HashMap::new();
        for subject in subjects {
            if let Some(course_id) = subject.course_id {
                by_course.entry(course_id).or_default().push(subject);
            }
        }

        Ok(courses
            .into_iter()
            .map(|course| {
                let subjects = by_course.remove(&course.id).unwrap_or_default();
                CourseWithSubjects { course, subjects }
            })
            .collect())
    }

    /// Delete a course by ID. Subjects keep existing with the link cleared.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
