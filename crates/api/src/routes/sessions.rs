use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::sessions;
use crate::state::AppState;

/// Study session routes mounted at `/sessions`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(sessions::list_sessions).post(sessions::create_session),
        )
        .route("/{id}", delete(sessions::delete_session))
}
