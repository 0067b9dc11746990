pub mod backlog;
pub mod health;
pub mod issue;
pub mod sprint;
pub mod todo;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /backlogs                  get by project (?projectId=), create
/// /sprints                   list by project (?projectId=), create
/// /sprints/{id}              get
/// /issues                    create, transfer (?transferto=sprint|backlog)
/// /issues/{id}               update, delete (?parent=sprint|backlog)
/// /todos                     create (?parent=sprint|backlog)
/// /todos/{id}                update, delete (?parent=sprint|backlog)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/backlogs", backlog::router())
        .nest("/sprints", sprint::router())
        .nest("/issues", issue::router())
        .nest("/todos", todo::router())
}
