use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::exams;
use crate::state::AppState;

/// Exam result routes mounted at `/exams`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(exams::list_exams).post(exams::create_exam))
        .route("/{id}", delete(exams::delete_exam))
}
