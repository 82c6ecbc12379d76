//! Progress statistics over sessions, exams, and lesson plans.

use serde::Serialize;

use crate::types::Timestamp;

/// Number of lessons returned by the upcoming-lessons widget.
pub const UPCOMING_LESSON_LIMIT: i64 = 3;

/// Aggregate totals shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudySummary {
    pub total_sessions: i64,
    /// Hours studied across all sessions, rounded to one decimal.
    pub total_hours: f64,
    /// Mean raw exam score; 0 when no exams are recorded.
    pub average_score: f64,
}

/// Count of lessons planned before today that are still incomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LessonProgress {
    pub overdue_lessons: i64,
}

/// Length of a session in hours. Negative spans count as zero.
pub fn session_hours(start: Timestamp, end: Timestamp) -> f64 {
    let millis = (end - start).num_milliseconds().max(0);
    millis as f64 / 3_600_000.0
}

/// Sum session durations and round to one decimal place.
pub fn total_hours<I>(sessions: I) -> f64
where
    I: IntoIterator<Item = (Timestamp, Timestamp)>,
{
    let hours: f64 = sessions
        .into_iter()
        .map(|(start, end)| session_hours(start, end))
        .sum();
    round_to_tenth(hours)
}

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Build the dashboard summary from raw session windows and the database
/// average (which is `NULL` when there are no exams).
pub fn summarize<I>(sessions: I, average_score: Option<f64>) -> StudySummary
where
    I: IntoIterator<Item = (Timestamp, Timestamp)>,
{
    let windows: Vec<_> = sessions.into_iter().collect();

    StudySummary {
        total_sessions: windows.len() as i64,
        total_hours: total_hours(windows),
        average_score: average_score.unwrap_or(0.0),
    }
}
