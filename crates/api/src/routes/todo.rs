//! Route definitions for the `/todos` resource.

use axum::routing::{patch, post};
use axum::Router;

use crate::handlers::todo;
use crate::state::AppState;

/// Routes mounted at `/todos`.
///
/// ```text
/// POST   /?parent=      -> create
/// PATCH  /{id}?parent=  -> update
/// DELETE /{id}?parent=  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(todo::create))
        .route("/{id}", patch(todo::update).delete(todo::delete))
}
