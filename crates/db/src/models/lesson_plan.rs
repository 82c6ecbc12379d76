//! Lesson plan and lesson checklist models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studytrack_core::checklist::ChecklistProgress;
use studytrack_core::types::{Date, DbId, Timestamp};

use crate::models::subject::Subject;

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A row from the `lesson_plans` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LessonPlan {
    pub id: DbId,
    pub title: String,
    pub subject_id: DbId,
    pub content: Option<String>,
    pub planned_date: Date,
    pub is_completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `lesson_checklist_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LessonChecklistItem {
    pub id: DbId,
    pub lesson_id: DbId,
    pub text: String,
    pub is_completed: bool,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Input for creating a lesson plan, optionally seeded from a template.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLessonPlan {
    pub title: String,
    pub subject_id: DbId,
    pub content: Option<String>,
    pub planned_date: Date,
    pub template_id: Option<DbId>,
}

/// Input for editing or rescheduling a lesson plan. The checklist is
/// never touched by an update.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLessonPlan {
    pub title: String,
    pub subject_id: DbId,
    pub content: Option<String>,
    pub planned_date: Date,
}

/// Body of the manual completion endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SetLessonCompletion {
    pub is_completed: bool,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A lesson with its subject, ordered checklist, and checklist progress.
#[derive(Debug, Serialize)]
pub struct LessonPlanDetail {
    #[serde(flatten)]
    pub lesson: LessonPlan,
    pub subject: Subject,
    pub checklist: Vec<LessonChecklistItem>,
    pub progress: ChecklistProgress,
}

impl LessonPlanDetail {
    pub fn new(lesson: LessonPlan, subject: Subject, checklist: Vec<LessonChecklistItem>) -> Self {
        let progress = ChecklistProgress::from_states(checklist.iter().map(|i| i.is_completed));
        Self {
            lesson,
            subject,
            checklist,
            progress,
        }
    }
}

/// A lesson with its subject only (upcoming-lessons widget).
#[derive(Debug, Serialize)]
pub struct LessonWithSubject {
    #[serde(flatten)]
    pub lesson: LessonPlan,
    pub subject: Subject,
}

/// Outcome of toggling one checklist item.
#[derive(Debug, Clone)]
pub struct ChecklistToggle {
    /// The item after the flip.
    pub item: LessonChecklistItem,
    /// The parent lesson's completion flag as recomputed in the same
    /// transaction.
    pub lesson_is_completed: bool,
}
