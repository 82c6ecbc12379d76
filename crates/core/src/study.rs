//! Validation rules for courses, subjects, lessons, study sessions, and
//! exam results.

use crate::types::{DbId, Timestamp};

/// Colour assigned to a subject created without one.
pub const DEFAULT_SUBJECT_COLOR: &str = "#4f46e5";

/// Maximum length of course, subject, and lesson names.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length of a study session topic.
pub const MAX_TOPIC_LENGTH: usize = 500;

/// Validate a required display name (`field` is used in the message).
pub fn validate_name(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} cannot be empty"));
    }
    if value.len() > MAX_NAME_LENGTH {
        return Err(format!(
            "{field} exceeds maximum length of {MAX_NAME_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Subjects always belong to a course.
pub fn require_course(course_id: Option<DbId>) -> Result<DbId, String> {
    course_id.ok_or_else(|| "Course is mandatory".to_string())
}

/// Validate a `#rrggbb` colour string.
pub fn validate_color(color: &str) -> Result<(), String> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(format!("Invalid color '{color}'. Expected #rrggbb"))
    }
}

/// Validate a study session: non-blank topic and a non-negative duration.
pub fn validate_session(topic: &str, start: Timestamp, end: Timestamp) -> Result<(), String> {
    if topic.trim().is_empty() {
        return Err("Topic cannot be empty".to_string());
    }
    if topic.len() > MAX_TOPIC_LENGTH {
        return Err(format!(
            "Topic exceeds maximum length of {MAX_TOPIC_LENGTH} characters"
        ));
    }
    if end < start {
        return Err("Session end time cannot be before its start time".to_string());
    }
    Ok(())
}

/// Validate an exam score against its maximum.
pub fn validate_exam_score(score: f64, max_score: f64) -> Result<(), String> {
    if !score.is_finite() || !max_score.is_finite() {
        return Err("Scores must be finite numbers".to_string());
    }
    if max_score <= 0.0 {
        return Err("Maximum score must be greater than zero".to_string());
    }
    if score < 0.0 {
        return Err("Score cannot be negative".to_string());
    }
    Ok(())
}

/// Exam score as a percentage of its maximum, rounded to one decimal.
pub fn exam_percentage(score: f64, max_score: f64) -> f64 {
    if max_score <= 0.0 {
        return 0.0;
    }
    (score / max_score * 1000.0).round() / 10.0
}
