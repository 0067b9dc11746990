//! Route definitions for the `/backlogs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::backlog;
use crate::state::AppState;

/// Routes mounted at `/backlogs`.
///
/// ```text
/// GET    /?projectId=    -> get_by_project
/// POST   /               -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(backlog::get_by_project).post(backlog::create))
}
