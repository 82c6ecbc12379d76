//! Handlers for exam results.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use studytrack_core::study::validate_exam_score;
use studytrack_core::types::DbId;
use studytrack_db::models::exam_result::CreateExamResult;
use studytrack_db::repositories::ExamResultRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /exams
///
/// Newest first, each with its subject and percentage.
pub async fn list_exams(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let exams = ExamResultRepo::list_detailed(&state.pool).await?;
    Ok(Json(DataResponse { data: exams }))
}

/// POST /exams
pub async fn create_exam(
    State(state): State<AppState>,
    Json(input): Json<CreateExamResult>,
) -> AppResult<impl IntoResponse> {
    validate_exam_score(input.score, input.max_score).map_err(AppError::validation)?;

    let exam = ExamResultRepo::create(&state.pool, &input).await?;
    tracing::info!(
        exam_id = exam.id,
        subject_id = exam.subject_id,
        score = exam.score,
        max_score = exam.max_score,
        "Exam result recorded"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: exam })))
}

/// DELETE /exams/{id}
pub async fn delete_exam(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ExamResultRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("ExamResult", id));
    }
    tracing::info!(exam_id = id, "Exam result deleted");
    Ok(StatusCode::NO_CONTENT)
}
