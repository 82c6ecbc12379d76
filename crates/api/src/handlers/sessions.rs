//! Handlers for study sessions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use studytrack_core::study::validate_session;
use studytrack_core::types::DbId;
use studytrack_db::models::study_session::CreateStudySession;
use studytrack_db::repositories::StudySessionRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /sessions
///
/// Newest first, each with its subject and (optional) lesson plan.
pub async fn list_sessions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let sessions = StudySessionRepo::list_detailed(&state.pool).await?;
    Ok(Json(DataResponse { data: sessions }))
}

/// POST /sessions
pub async fn create_session(
    State(state): State<AppState>,
    Json(input): Json<CreateStudySession>,
) -> AppResult<impl IntoResponse> {
    validate_session(&input.topic, input.start_time, input.end_time)
        .map_err(AppError::validation)?;

    let session = StudySessionRepo::create(&state.pool, &input).await?;
    tracing::info!(
        session_id = session.id,
        subject_id = session.subject_id,
        lesson_plan_id = ?session.lesson_plan_id,
        is_review = session.is_review,
        "Study session recorded"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}

/// DELETE /sessions/{id}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !StudySessionRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("StudySession", id));
    }
    tracing::info!(session_id = id, "Study session deleted");
    Ok(StatusCode::NO_CONTENT)
}
