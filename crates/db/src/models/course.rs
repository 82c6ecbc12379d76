//! Course model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studytrack_core::types::{DbId, Timestamp};

use crate::models::subject::Subject;

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new course.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourse {
    pub name: String,
    pub description: Option<String>,
}

/// A course together with the subjects filed under it.
#[derive(Debug, Serialize)]
pub struct CourseWithSubjects {
    #[serde(flatten)]
    pub course: Course,
    pub subjects: Vec<Subject>,
}
