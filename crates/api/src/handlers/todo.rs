//! Handlers for the `/todos` resource.
//!
//! Todos live two levels down (sprint/backlog -> issue -> todo); the `parent`
//! query selects which collection is searched.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use scrumboard_core::error::CoreError;
use scrumboard_core::validation;
use scrumboard_db::models::issue::TodoView;
use scrumboard_db::models::parse_id;
use scrumboard_db::repositories::TodoRepo;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiQuery};
use crate::query::ParentParams;
use crate::state::AppState;

const BODY_REQUIRED: &str = "you must include issue property and todo object";

/// Body of `POST /todos` and `PATCH /todos/{id}`.
#[derive(Debug, Deserialize)]
pub struct TodoBody {
    pub issue: Option<String>,
    pub todo: Option<Map<String, Value>>,
}

impl TodoBody {
    /// Both the issue id and the todo object must be present.
    fn into_parts(self) -> Result<(String, Map<String, Value>), CoreError> {
        match (self.issue, self.todo) {
            (Some(issue), Some(todo)) if !issue.is_empty() => Ok((issue, todo)),
            _ => Err(CoreError::validation(BODY_REQUIRED)),
        }
    }
}

/// POST /todos?parent=sprint|backlog
pub async fn create(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ParentParams>,
    ApiJson(body): ApiJson<TodoBody>,
) -> AppResult<(StatusCode, Json<TodoView>)> {
    let (issue, raw) = body.into_parts()?;
    let kind = params.kind()?;
    let fields = validation::todo_for_create(&raw)?;
    let issue_id = parse_id("issue", &issue)?;

    let todo = TodoRepo::create(state.store.as_ref(), kind, issue_id, fields).await?;
    Ok((StatusCode::CREATED, Json(TodoView::from(&todo))))
}

/// PATCH /todos/{id}?parent=sprint|backlog
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(params): ApiQuery<ParentParams>,
    ApiJson(body): ApiJson<TodoBody>,
) -> AppResult<Json<TodoView>> {
    let kind = params.kind()?;
    let (issue, raw) = body.into_parts()?;
    let fields = validation::todo_for_update(&raw)?;
    let todo_id = parse_id("todo", &id)?;
    let issue_id = parse_id("issue", &issue)?;

    let todo = TodoRepo::update(state.store.as_ref(), kind, issue_id, todo_id, &fields).await?;
    Ok(Json(TodoView::from(&todo)))
}

/// DELETE /todos/{id}?parent=sprint|backlog
///
/// Responds with the todo that was removed.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(params): ApiQuery<ParentParams>,
) -> AppResult<Json<TodoView>> {
    let kind = params.kind()?;
    let todo_id = parse_id("todo", &id)?;

    let todo = TodoRepo::delete(state.store.as_ref(), kind, todo_id).await?;
    Ok(Json(TodoView::from(&todo)))
}
