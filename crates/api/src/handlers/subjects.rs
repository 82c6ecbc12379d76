//! Handlers for subjects.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use studytrack_core::study::{require_course, validate_color, validate_name};
use studytrack_core::types::DbId;
use studytrack_db::models::subject::SubjectInput;
use studytrack_db::repositories::SubjectRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Shared checks for create and update.
fn validate_subject(input: &SubjectInput) -> AppResult<()> {
    validate_name("Subject name", &input.name).map_err(AppError::validation)?;
    require_course(input.course_id).map_err(AppError::BadRequest)?;
    if let Some(ref color) = input.color {
        validate_color(color).map_err(AppError::validation)?;
    }
    Ok(())
}

/// GET /subjects
///
/// All subjects by name, each with its course and lesson plans.
pub async fn list_subjects(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let subjects = SubjectRepo::list_detailed(&state.pool).await?;
    Ok(Json(DataResponse { data: subjects }))
}

/// POST /subjects
pub async fn create_subject(
    State(state): State<AppState>,
    Json(input): Json<SubjectInput>,
) -> AppResult<impl IntoResponse> {
    validate_subject(&input)?;

    let subject = SubjectRepo::create(&state.pool, &input).await?;
    tracing::info!(
        subject_id = subject.id,
        course_id = ?subject.course_id,
        name = %subject.name,
        "Subject created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: subject })))
}

/// PUT /subjects/{id}
pub async fn update_subject(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SubjectInput>,
) -> AppResult<impl IntoResponse> {
    validate_subject(&input)?;

    let subject = SubjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Subject", id))?;
    tracing::info!(subject_id = id, "Subject updated");

    Ok(Json(DataResponse { data: subject }))
}

/// DELETE /subjects/{id}
///
/// Cascades to the subject's lessons, sessions, and exam results.
pub async fn delete_subject(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !SubjectRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Subject", id));
    }
    tracing::info!(subject_id = id, "Subject deleted");
    Ok(StatusCode::NO_CONTENT)
}
