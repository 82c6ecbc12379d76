pub mod courses;
pub mod exams;
pub mod health;
pub mod lessons;
pub mod sessions;
pub mod stats;
pub mod subjects;
pub mod templates;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /courses                                 list, create
/// /courses/{id}                            delete
///
/// /subjects                                list, create
/// /subjects/{id}                           update, delete
///
/// /templates                               list, create
/// /templates/{id}                          get, replace, delete
///
/// /lessons                                 list, create (copies template items)
/// /lessons/upcoming                        next open lessons
/// /lessons/{id}                            get, update, delete
/// /lessons/{id}/complete                   set completion flag (PUT)
/// /lessons/checklist-items/{id}/toggle     flip one checklist item (PUT)
///
/// /sessions                                list, create
/// /sessions/{id}                           delete
///
/// /exams                                   list, create
/// /exams/{id}                              delete
///
/// /stats/summary                           sessions, hours, average score
/// /stats/progress                          overdue lessons
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/courses", courses::router())
        .nest("/subjects", subjects::router())
        .nest("/templates", templates::router())
        .nest("/lessons", lessons::router())
        .nest("/sessions", sessions::router())
        .nest("/exams", exams::router())
        .nest("/stats", stats::router())
}
