//! Subject model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studytrack_core::types::{DbId, Timestamp};

use crate::models::course::Course;
use crate::models::lesson_plan::LessonPlan;

/// A row from the `subjects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subject {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub course_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing a subject.
///
/// `course_id` is optional at the wire level so a missing value can be
/// reported as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectInput {
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub course_id: Option<DbId>,
}

/// A subject with its course and planned lessons.
#[derive(Debug, Serialize)]
pub struct SubjectDetail {
    #[serde(flatten)]
    pub subject: Subject,
    pub course: Option<Course>,
    pub lesson_plans: Vec<LessonPlan>,
}
