//! Route definitions for lesson plans and their checklists.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::lessons;
use crate::state::AppState;

/// Lesson routes mounted at `/lessons`.
///
/// ```text
/// GET    /                               -> list_lessons
/// POST   /                               -> create_lesson
/// GET    /upcoming                       -> list_upcoming
/// PUT    /checklist-items/{id}/toggle    -> toggle_checklist_item
/// GET    /{id}                           -> get_lesson
/// PUT    /{id}                           -> update_lesson
/// DELETE /{id}                           -> delete_lesson
/// PUT    /{id}/complete                  -> set_lesson_completion
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(lessons::list_lessons).post(lessons::create_lesson),
        )
        .route("/upcoming", get(lessons::list_upcoming))
        .route(
            "/checklist-items/{id}/toggle",
            put(lessons::toggle_checklist_item),
        )
        .route(
            "/{id}",
            get(lessons::get_lesson)
                .put(lessons::update_lesson)
                .delete(lessons::delete_lesson),
        )
        .route("/{id}/complete", put(lessons::set_lesson_completion))
}
