use axum::routing::get;
use axum::Router;

use crate::handlers::stats;
use crate::state::AppState;

/// Statistics routes mounted at `/stats`.
///
/// ```text
/// GET /summary    -> get_summary
/// GET /progress   -> get_progress
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(stats::get_summary))
        .route("/progress", get(stats::get_progress))
}
