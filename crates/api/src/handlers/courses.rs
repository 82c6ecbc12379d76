//! Handlers for courses.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use studytrack_core::study::validate_name;
use studytrack_core::types::DbId;
use studytrack_db::models::course::CreateCourse;
use studytrack_db::repositories::CourseRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /courses
///
/// All courses by name, each with its subjects.
pub async fn list_courses(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let courses = CourseRepo::list_with_subjects(&state.pool).await?;
    Ok(Json(DataResponse { data: courses }))
}

/// POST /courses
pub async fn create_course(
    State(state): State<AppState>,
    Json(input): Json<CreateCourse>,
) -> AppResult<impl IntoResponse> {
    validate_name("Course name", &input.name).map_err(AppError::validation)?;

    let course = CourseRepo::create(&state.pool, &input).await?;
    tracing::info!(course_id = course.id, name = %course.name, "Course created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: course })))
}

/// DELETE /courses/{id}
///
/// Subjects of the course survive with their course link cleared.
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CourseRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Course", id));
    }
    tracing::info!(course_id = id, "Course deleted");
    Ok(StatusCode::NO_CONTENT)
}
