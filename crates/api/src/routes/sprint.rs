//! Route definitions for the `/sprints` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::sprint;
use crate::state::AppState;

/// Routes mounted at `/sprints`.
///
/// ```text
/// GET    /?projectId=    -> list_by_project
/// POST   /               -> create
/// GET    /{id}           -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(sprint::list_by_project).post(sprint::create))
        .route("/{id}", get(sprint::get_by_id))
}
