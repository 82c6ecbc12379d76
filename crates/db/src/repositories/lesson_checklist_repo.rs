//! Repository for the `lesson_checklist_items` table.
//!
//! Toggling an item and recomputing the parent lesson's completion flag is
//! a single transaction that holds the lesson row lock, so concurrent
//! toggles on one lesson are applied one after another and the flag always
//! reflects the committed item states.

use sqlx::PgPool;
use studytrack_core::checklist::derived_completion;
use studytrack_core::types::DbId;

use crate::models::lesson_plan::{ChecklistToggle, LessonChecklistItem};

pub(crate) const COLUMNS: &str =
    "id, lesson_id, text, is_completed, sort_order, created_at, updated_at";

/// Provides read and toggle operations for lesson checklist items.
pub struct LessonChecklistRepo;

impl LessonChecklistRepo {
    /// Find a checklist item by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<LessonChecklistItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lesson_checklist_items WHERE id = $1");
        sqlx::query_as::<_, LessonChecklistItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a lesson's checklist in `sort_order`.
    pub async fn list_by_lesson(
        pool: &PgPool,
        lesson_id: DbId,
    ) -> Result<Vec<LessonChecklistItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM lesson_checklist_items \
             WHERE lesson_id = $1 \
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, LessonChecklistItem>(&query)
            .bind(lesson_id)
            .fetch_all(pool)
            .await
    }

    /// Flip an item's completion and recompute its lesson's flag.
    ///
    /// Steps, all in one transaction:
    /// 1. lock the parent lesson row (`FOR UPDATE`);
    /// 2. flip the item;
    /// 3. read every item of the lesson;
    /// 4. set the lesson's `is_completed` to "all items done".
    ///
    /// Returns `None` (and changes nothing) if the item does not exist.
    pub async fn toggle(
        pool: &PgPool,
        item_id: DbId,
    ) -> Result<Option<ChecklistToggle>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some((lesson_id,)) = sqlx::query_as::<_, (DbId,)>(
            "SELECT lesson_id FROM lesson_checklist_items WHERE id = $1",
        )
        .bind(item_id)
        .fetch_optional(&mut *tx)
        .await?
        else {
            return Ok(None);
        };

        // Serializes toggles on the same lesson.
        let locked = sqlx::query("SELECT id FROM lesson_plans WHERE id = $1 FOR UPDATE")
            .bind(lesson_id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Ok(None);
        }

        let query = format!(
            "UPDATE lesson_checklist_items SET is_completed = NOT is_completed \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let Some(item) = sqlx::query_as::<_, LessonChecklistItem>(&query)
            .bind(item_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let states: Vec<(bool,)> = sqlx::query_as(
            "SELECT is_completed FROM lesson_checklist_items WHERE lesson_id = $1",
        )
        .bind(lesson_id)
        .fetch_all(&mut *tx)
        .await?;

        // The toggled item is always present, so the checklist is non-empty.
        let all_done = derived_completion(states.iter().map(|(done,)| *done)).unwrap_or(false);

        sqlx::query("UPDATE lesson_plans SET is_completed = $2 WHERE id = $1")
            .bind(lesson_id)
            .bind(all_done)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(ChecklistToggle {
            item,
            lesson_is_completed: all_done,
        }))
    }
}
