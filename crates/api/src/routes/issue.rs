//! Route definitions for the `/issues` resource.

use axum::routing::{patch, post};
use axum::Router;

use crate::handlers::issue;
use crate::state::AppState;

/// Routes mounted at `/issues`.
///
/// ```text
/// POST   /                          -> create_or_transfer
/// POST   /?transferto=sprint        -> create_or_transfer (move into a sprint)
/// PATCH  /{id}?parent=sprint        -> update
/// DELETE /{id}?parent=backlog       -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(issue::create_or_transfer))
        .route("/{id}", patch(issue::update).delete(issue::delete))
}
