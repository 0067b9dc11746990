//! Handlers for the `/backlogs` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use scrumboard_core::error::CoreError;
use scrumboard_db::models::parent::ParentView;
use scrumboard_db::models::parse_id;
use scrumboard_db::repositories::ParentRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiQuery};
use crate::query::ProjectParams;
use crate::state::AppState;

/// Body of `POST /backlogs`.
#[derive(Debug, Deserialize)]
pub struct CreateBacklog {
    pub project: Option<String>,
}

/// GET /backlogs?projectId=
///
/// Responds with the project's backlog, or `null` when it has none.
pub async fn get_by_project(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ProjectParams>,
) -> AppResult<Json<Option<ParentView>>> {
    let project = params.project()?;
    let backlog = ParentRepo::find_backlog_by_project(state.store.as_ref(), project).await?;
    Ok(Json(backlog.as_ref().map(ParentView::from)))
}

/// POST /backlogs
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateBacklog>,
) -> AppResult<(StatusCode, Json<ParentView>)> {
    let project = match input.project.as_deref() {
        Some(raw) if !raw.is_empty() => parse_id("project", raw)?,
        _ => return Err(CoreError::validation("you must include project property").into()),
    };
    let backlog = ParentRepo::create_backlog(state.store.as_ref(), project).await?;
    Ok((StatusCode::CREATED, Json(ParentView::from(&backlog))))
}
