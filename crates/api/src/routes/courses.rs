use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::courses;
use crate::state::AppState;

/// Course routes mounted at `/courses`.
///
/// ```text
/// GET    /        -> list_courses
/// POST   /        -> create_course
/// DELETE /{id}    -> delete_course
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(courses::list_courses).post(courses::create_course),
        )
        .route("/{id}", delete(courses::delete_course))
}
