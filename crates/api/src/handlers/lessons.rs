//! Handlers for lesson plans and their checklists.
//!
//! A lesson's checklist is copied from a template when the lesson is
//! created. Toggling an item re-derives the lesson's completion flag; the
//! flag can also be set by hand.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use studytrack_core::error::CoreError;
use studytrack_core::stats::UPCOMING_LESSON_LIMIT;
use studytrack_core::study::validate_name;
use studytrack_core::types::DbId;
use studytrack_db::models::lesson_plan::{CreateLessonPlan, SetLessonCompletion, UpdateLessonPlan};
use studytrack_db::repositories::{LessonChecklistRepo, LessonPlanRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /lessons
///
/// List all lessons by planned date, with subject, checklist, and progress.
pub async fn list_lessons(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let lessons = LessonPlanRepo::list_detailed(&state.pool).await?;
    Ok(Json(DataResponse { data: lessons }))
}

/// GET /lessons/upcoming
///
/// The next few open lessons planned for today or later.
pub async fn list_upcoming(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let today = Utc::now().date_naive();
    let lessons = LessonPlanRepo::list_upcoming(&state.pool, today, UPCOMING_LESSON_LIMIT).await?;
    Ok(Json(DataResponse { data: lessons }))
}

/// GET /lessons/{id}
pub async fn get_lesson(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let lesson = LessonPlanRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("LessonPlan", id))?;
    Ok(Json(DataResponse { data: lesson }))
}

/// POST /lessons
///
/// Create a lesson. When `template_id` names an existing template its items
/// are copied into the lesson's checklist; an unknown template yields an
/// empty checklist. An unknown subject is rejected and nothing is written.
pub async fn create_lesson(
    State(state): State<AppState>,
    Json(input): Json<CreateLessonPlan>,
) -> AppResult<impl IntoResponse> {
    validate_name("Title", &input.title).map_err(AppError::validation)?;

    let lesson = LessonPlanRepo::create_with_checklist(&state.pool, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::UnknownReference {
                entity: "Subject",
                id: input.subject_id,
            })
        })?;

    tracing::info!(
        lesson_id = lesson.lesson.id,
        subject_id = lesson.lesson.subject_id,
        template_id = ?input.template_id,
        checklist_items = lesson.checklist.len(),
        "Lesson created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: lesson })))
}

/// PUT /lessons/{id}
///
/// Edit or reschedule a lesson. The checklist is left untouched; the reply
/// carries the subject, checklist, and progress like `GET /lessons/{id}`.
pub async fn update_lesson(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLessonPlan>,
) -> AppResult<impl IntoResponse> {
    validate_name("Title", &input.title).map_err(AppError::validation)?;

    let updated = LessonPlanRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("LessonPlan", id))?;

    tracing::info!(lesson_id = id, planned_date = %updated.planned_date, "Lesson updated");

    let lesson = LessonPlanRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("LessonPlan", id))?;

    Ok(Json(DataResponse { data: lesson }))
}

/// PUT /lessons/{id}/complete
///
/// Set the completion flag by hand. The checklist is not touched, so a
/// later toggle re-derives the flag from the items.
pub async fn set_lesson_completion(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetLessonCompletion>,
) -> AppResult<impl IntoResponse> {
    let lesson = LessonPlanRepo::set_completion(&state.pool, id, input.is_completed)
        .await?
        .ok_or_else(|| AppError::not_found("LessonPlan", id))?;

    tracing::info!(lesson_id = id, is_completed = lesson.is_completed, "Lesson completion set");

    Ok(Json(DataResponse { data: lesson }))
}

/// PUT /lessons/checklist-items/{id}/toggle
///
/// Flip one checklist item and recompute the owning lesson's completion.
/// Only the item is returned; callers re-fetch the lesson to see its flag.
pub async fn toggle_checklist_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let toggled = LessonChecklistRepo::toggle(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("ChecklistItem", id))?;

    tracing::info!(
        item_id = id,
        lesson_id = toggled.item.lesson_id,
        item_completed = toggled.item.is_completed,
        lesson_completed = toggled.lesson_is_completed,
        "Checklist item toggled"
    );

    Ok(Json(DataResponse { data: toggled.item }))
}

/// DELETE /lessons/{id}
pub async fn delete_lesson(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !LessonPlanRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("LessonPlan", id));
    }
    tracing::info!(lesson_id = id, "Lesson deleted");
    Ok(StatusCode::NO_CONTENT)
}
