//! Study session model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studytrack_core::types::{DbId, Timestamp};

use crate::models::lesson_plan::LessonPlan;
use crate::models::subject::Subject;

/// A row from the `study_sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudySession {
    pub id: DbId,
    pub subject_id: DbId,
    pub lesson_plan_id: Option<DbId>,
    pub topic: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub is_review: bool,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for logging a study session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudySession {
    pub subject_id: DbId,
    pub lesson_plan_id: Option<DbId>,
    pub topic: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    #[serde(default)]
    pub is_review: bool,
    pub notes: Option<String>,
}

/// A session with its subject and (optional) lesson plan.
#[derive(Debug, Serialize)]
pub struct StudySessionDetail {
    #[serde(flatten)]
    pub session: StudySession,
    pub subject: Subject,
    pub lesson_plan: Option<LessonPlan>,
}
