//! Exam result model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studytrack_core::study::exam_percentage;
use studytrack_core::types::{Date, DbId, Timestamp};

use crate::models::subject::Subject;

/// A row from the `exam_results` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ExamResult {
    pub id: DbId,
    pub subject_id: DbId,
    pub score: f64,
    pub max_score: f64,
    pub date: Date,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording an exam result.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExamResult {
    pub subject_id: DbId,
    pub score: f64,
    pub max_score: f64,
    pub date: Date,
    pub notes: Option<String>,
}

/// An exam result with its subject and score percentage.
#[derive(Debug, Serialize)]
pub struct ExamResultDetail {
    #[serde(flatten)]
    pub exam: ExamResult,
    pub subject: Subject,
    pub percentage: f64,
}

impl ExamResultDetail {
    pub fn new(exam: ExamResult, subject: Subject) -> Self {
        let percentage = exam_percentage(exam.score, exam.max_score);
        Self {
            exam,
            subject,
            percentage,
        }
    }
}
