//! Handlers for the dashboard statistics.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use studytrack_core::stats::{summarize, LessonProgress};
use studytrack_db::repositories::{ExamResultRepo, LessonPlanRepo, StudySessionRepo};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /stats/summary
///
/// Session count, total hours studied, and mean exam score.
pub async fn get_summary(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let windows = StudySessionRepo::list_windows(&state.pool).await?;
    let average = ExamResultRepo::average_score(&state.pool).await?;
    Ok(Json(DataResponse {
        data: summarize(windows, average),
    }))
}

/// GET /stats/progress
///
/// Open lessons planned before today (UTC).
pub async fn get_progress(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let today = Utc::now().date_naive();
    let overdue_lessons = LessonPlanRepo::count_overdue(&state.pool, today).await?;
    Ok(Json(DataResponse {
        data: LessonProgress { overdue_lessons },
    }))
}
