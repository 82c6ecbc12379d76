//! Handlers for checklist templates.
//!
//! Editing or deleting a template never reaches lessons already created
//! from it: those hold their own copy of the items.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use studytrack_core::checklist::{ordered_items, validate_template_items, validate_template_name};
use studytrack_core::types::DbId;
use studytrack_db::models::checklist_template::ChecklistTemplateInput;
use studytrack_db::repositories::ChecklistTemplateRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /templates
pub async fn list_templates(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let templates = ChecklistTemplateRepo::list_with_items(&state.pool).await?;
    Ok(Json(DataResponse { data: templates }))
}

/// GET /templates/{id}
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let template = ChecklistTemplateRepo::find_with_items(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("ChecklistTemplate", id))?;
    Ok(Json(DataResponse { data: template }))
}

/// POST /templates
///
/// Items are stored in the order given.
pub async fn create_template(
    State(state): State<AppState>,
    Json(input): Json<ChecklistTemplateInput>,
) -> AppResult<impl IntoResponse> {
    validate_template_name(&input.name).map_err(AppError::validation)?;
    let texts = validate_template_items(input.items.as_deref()).map_err(AppError::validation)?;

    let template = ChecklistTemplateRepo::create(
        &state.pool,
        &input.name,
        input.description.as_deref(),
        &ordered_items(texts),
    )
    .await?;

    tracing::info!(
        template_id = template.template.id,
        items = template.items.len(),
        "Checklist template created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: template })))
}

/// PUT /templates/{id}
///
/// Replace name, description, and the full item list.
pub async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ChecklistTemplateInput>,
) -> AppResult<impl IntoResponse> {
    validate_template_name(&input.name).map_err(AppError::validation)?;
    let texts = validate_template_items(input.items.as_deref()).map_err(AppError::validation)?;

    let template = ChecklistTemplateRepo::replace(
        &state.pool,
        id,
        &input.name,
        input.description.as_deref(),
        &ordered_items(texts),
    )
    .await?
    .ok_or_else(|| AppError::not_found("ChecklistTemplate", id))?;

    tracing::info!(template_id = id, items = template.items.len(), "Checklist template replaced");

    Ok(Json(DataResponse { data: template }))
}

/// DELETE /templates/{id}
pub async fn delete_template(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ChecklistTemplateRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("ChecklistTemplate", id));
    }
    tracing::info!(template_id = id, "Checklist template deleted");
    Ok(StatusCode::NO_CONTENT)
}
