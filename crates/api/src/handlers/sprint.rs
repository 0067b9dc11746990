//! Handlers for the `/sprints` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use scrumboard_core::error::CoreError;
use scrumboard_core::parent::ParentKind;
use scrumboard_db::models::parent::ParentView;
use scrumboard_db::models::parse_id;
use scrumboard_db::repositories::ParentRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiQuery};
use crate::query::ProjectParams;
use crate::state::AppState;

/// Body of `POST /sprints`.
#[derive(Debug, Deserialize)]
pub struct CreateSprint {
    pub project: Option<String>,
    pub name: Option<String>,
}

/// GET /sprints?projectId=
pub async fn list_by_project(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ProjectParams>,
) -> AppResult<Json<Vec<ParentView>>> {
    let project = params.project()?;
    let sprints = ParentRepo::list_sprints_by_project(state.store.as_ref(), project).await?;
    Ok(Json(sprints.iter().map(ParentView::from).collect()))
}

/// GET /sprints/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ParentView>> {
    let sprint_id = parse_id("sprint", &id)?;
    let sprint = ParentRepo::find_by_id(state.store.as_ref(), ParentKind::Sprint, sprint_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Sprint", sprint_id)))?;
    Ok(Json(ParentView::from(&sprint)))
}

/// POST /sprints
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateSprint>,
) -> AppResult<(StatusCode, Json<ParentView>)> {
    let project = match input.project.as_deref() {
        Some(raw) if !raw.is_empty() => parse_id("project", raw)?,
        _ => return Err(CoreError::validation("you must include project property").into()),
    };
    let sprint = ParentRepo::create_sprint(state.store.as_ref(), project, input.name).await?;
    Ok((StatusCode::CREATED, Json(ParentView::from(&sprint))))
}
