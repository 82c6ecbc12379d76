//! Repository for the `lesson_plans` table.
//!
//! Creating a lesson copies the chosen template's items into
//! `lesson_checklist_items` inside the same transaction as the lesson insert.

use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};
use studytrack_core::checklist::{snapshot_template, ChecklistItemSeed};
use studytrack_core::types::{Date, DbId};

use crate::models::lesson_plan::{
    CreateLessonPlan, LessonChecklistItem, LessonPlan, LessonPlanDetail, LessonWithSubject,
    UpdateLessonPlan,
};
use crate::models::subject::Subject;
use crate::repositories::checklist_template_repo::list_items;
use crate::repositories::{lesson_checklist_repo, subject_repo, LessonChecklistRepo, SubjectRepo};

pub(crate) const COLUMNS: &str =
    "id, title, subject_id, content, planned_date, is_completed, created_at, updated_at";

/// Provides CRUD operations for lesson plans.
pub struct LessonPlanRepo;

impl LessonPlanRepo {
    /// Create a lesson and snapshot its checklist from a template, atomically.
    ///
    /// - Returns `None` if `subject_id` does not reference a subject.
    /// - An unknown `template_id` is not an error: the lesson is created
    ///   with an empty checklist.
    pub async fn create_with_checklist(
        pool: &PgPool,
        input: &CreateLessonPlan,
    ) -> Result<Option<LessonPlanDetail>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let subject_query = format!(
            "SELECT {} FROM subjects WHERE id = $1 FOR KEY SHARE",
            subject_repo::COLUMNS
        );
        let Some(subject) = sqlx::query_as::<_, Subject>(&subject_query)
            .bind(input.subject_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let seeds = match input.template_id {
            Some(template_id) => {
                let items = list_items(&mut tx, template_id).await?;
                if items.is_empty() {
                    tracing::debug!(template_id, "Template missing or empty, lesson gets no checklist");
                }
                snapshot_template(items.iter().map(|i| (i.text.as_str(), i.sort_order)))
            }
            None => Vec::new(),
        };

        let query = format!(
            "INSERT INTO lesson_plans (title, subject_id, content, planned_date) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let lesson = sqlx::query_as::<_, LessonPlan>(&query)
            .bind(&input.title)
            .bind(input.subject_id)
            .bind(&input.content)
            .bind(input.planned_date)
            .fetch_one(&mut *tx)
            .await?;

        let checklist = insert_checklist(&mut tx, lesson.id, &seeds).await?;

        tx.commit().await?;
        Ok(Some(LessonPlanDetail::new(lesson, subject, checklist)))
    }

    /// Find a lesson plan by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<LessonPlan>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lesson_plans WHERE id = $1");
        sqlx::query_as::<_, LessonPlan>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a lesson with its subject, ordered checklist, and progress.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<LessonPlanDetail>, sqlx::Error> {
        let Some(lesson) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let Some(subject) = SubjectRepo::find_by_id(pool, lesson.subject_id).await? else {
            return Ok(None);
        };
        let checklist = LessonChecklistRepo::list_by_lesson(pool, id).await?;
        Ok(Some(LessonPlanDetail::new(lesson, subject, checklist)))
    }

    /// Load lesson plans for the given IDs, keyed by ID.
    pub async fn map_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<HashMap<DbId, LessonPlan>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let query = format!("SELECT {COLUMNS} FROM lesson_plans WHERE id = ANY($1)");
        let rows = sqlx::query_as::<_, LessonPlan>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|l| (l.id, l)).collect())
    }

    /// List all lessons by planned date, each with subject, checklist, and
    /// progress.
    pub async fn list_detailed(pool: &PgPool) -> Result<Vec<LessonPlanDetail>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lesson_plans ORDER BY planned_date ASC, id ASC");
        let lessons = sqlx::query_as::<_, LessonPlan>(&query).fetch_all(pool).await?;

        let ids: Vec<DbId> = lessons.iter().map(|l| l.id).collect();
        let subjects = SubjectRepo::map_by_ids(pool, &subject_ids(&lessons)).await?;

        let item_query = format!(
            "SELECT {} FROM lesson_checklist_items WHERE lesson_id = ANY($1) \
             ORDER BY lesson_id, sort_order ASC",
            lesson_checklist_repo::COLUMNS
        );
        let items = sqlx::query_as::<_, LessonChecklistItem>(&item_query)
            .bind(&ids)
            .fetch_all(pool)
            .await?;
        let mut by_lesson: HashMap<DbId, Vec<LessonChecklistItem>> = HashMap::new();
        for item in items {
            by_lesson.entry(item.lesson_id).or_default().push(item);
        }

        Ok(lessons
            .into_iter()
            .filter_map(|lesson| {
                let subject = subjects.get(&lesson.subject_id)?.clone();
                let checklist = by_lesson.remove(&lesson.id).unwrap_or_default();
                Some(LessonPlanDetail::new(lesson, subject, checklist))
            })
            .collect())
    }

    /// Incomplete lessons planned on or after `today`, earliest first.
    pub async fn list_upcoming(
        pool: &PgPool,
        today: Date,
        limit: i64,
    ) -> Result<Vec<LessonWithSubject>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM lesson_plans \
             WHERE planned_date >= $1 AND is_completed = false \
             ORDER BY planned_date ASC, id ASC \
             LIMIT $2"
        );
        let lessons = sqlx::query_as::<_, LessonPlan>(&query)
            .bind(today)
            .bind(limit)
            .fetch_all(pool)
            .await?;

        let subjects = SubjectRepo::map_by_ids(pool, &subject_ids(&lessons)).await?;

        Ok(lessons
            .into_iter()
            .filter_map(|lesson| {
                let subject = subjects.get(&lesson.subject_id)?.clone();
                Some(LessonWithSubject { lesson, subject })
            })
            .collect())
    }

    /// Count incomplete lessons planned strictly before `today`.
    pub async fn count_overdue(pool: &PgPool, today: Date) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM lesson_plans \
             WHERE planned_date < $1 AND is_completed = false",
        )
        .bind(today)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Edit or reschedule a lesson. The checklist and completion flag are
    /// left untouched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLessonPlan,
    ) -> Result<Option<LessonPlan>, sqlx::Error> {
        let query = format!(
            "UPDATE lesson_plans SET \
                title = $2, \
                subject_id = $3, \
                content = $4, \
                planned_date = $5 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LessonPlan>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.subject_id)
            .bind(&input.content)
            .bind(input.planned_date)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the completion flag regardless of checklist state.
    pub async fn set_completion(
        pool: &PgPool,
        id: DbId,
        is_completed: bool,
    ) -> Result<Option<LessonPlan>, sqlx::Error> {
        let query = format!(
            "UPDATE lesson_plans SET is_completed = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LessonPlan>(&query)
            .bind(id)
            .bind(is_completed)
            .fetch_optional(pool)
            .await
    }

    /// Delete a lesson and, by cascade, its checklist. Sessions that
    /// referenced it keep existing with the link cleared.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lesson_plans WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn subject_ids(lessons: &[LessonPlan]) -> Vec<DbId> {
    let mut ids: Vec<DbId> = lessons.iter().map(|l| l.subject_id).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Batch-insert a lesson's checklist, all items incomplete, in `sort_order`.
async fn insert_checklist(
    conn: &mut PgConnection,
    lesson_id: DbId,
    seeds: &[ChecklistItemSeed],
) -> Result<Vec<LessonChecklistItem>, sqlx::Error> {
    if seeds.is_empty() {
        return Ok(vec![]);
    }

    let texts: Vec<String> = seeds.iter().map(|s| s.text.clone()).collect();
    let orders: Vec<i32> = seeds.iter().map(|s| s.order).collect();

    let query = format!(
        "INSERT INTO lesson_checklist_items (lesson_id, text, is_completed, sort_order) \
         SELECT $1::bigint, t.text, false, t.sort_order \
         FROM UNNEST($2::text[], $3::int[]) AS t(text, sort_order) \
         RETURNING {}",
        lesson_checklist_repo::COLUMNS
    );
    let mut rows = sqlx::query_as::<_, LessonChecklistItem>(&query)
        .bind(lesson_id)
        .bind(&texts)
        .bind(&orders)
        .fetch_all(conn)
        .await?;
    rows.sort_by_key(|r| r.sort_order);
    Ok(rows)
}
