//! Handlers for the `/issues` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use scrumboard_core::error::CoreError;
use scrumboard_core::parent::ParentKind;
use scrumboard_core::validation;
use scrumboard_db::models::issue::IssueView;
use scrumboard_db::models::parse_id;
use scrumboard_db::repositories::IssueRepo;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiQuery};
use crate::query::{IssueCreateParams, ParentParams};
use crate::state::AppState;

/// Body of `POST /issues`.
///
/// For a plain create, `issue` is the new issue object. With `?transferto=`,
/// `issue` is the id of the issue to move. Exactly one of `sprint` and
/// `backlog` names the parent document in both cases.
#[derive(Debug, Deserialize)]
pub struct IssuePostBody {
    pub sprint: Option<String>,
    pub backlog: Option<String>,
    pub issue: Option<Value>,
}

impl IssuePostBody {
    /// The single parent named in the body.
    fn parent(&self) -> Result<(ParentKind, &str), CoreError> {
        let sprint = self.sprint.as_deref().filter(|s| !s.is_empty());
        let backlog = self.backlog.as_deref().filter(|s| !s.is_empty());
        match (sprint, backlog) {
            (Some(id), None) => Ok((ParentKind::Sprint, id)),
            (None, Some(id)) => Ok((ParentKind::Backlog, id)),
            (Some(_), Some(_)) => Err(CoreError::validation(
                "you must provide either sprint or backlog property, not both",
            )),
            (None, None) => Err(CoreError::validation(
                "you must provide a sprint or backlog property",
            )),
        }
    }
}

/// POST /issues
/// POST /issues?transferto=sprint|backlog
pub async fn create_or_transfer(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<IssueCreateParams>,
    ApiJson(body): ApiJson<IssuePostBody>,
) -> AppResult<(StatusCode, Json<IssueView>)> {
    match params.transferto.as_deref() {
        Some(target) => transfer(state, target, body).await,
        None => create(state, body).await,
    }
}

async fn create(state: AppState, body: IssuePostBody) -> AppResult<(StatusCode, Json<IssueView>)> {
    let (kind, parent) = body.parent()?;
    let raw = match &body.issue {
        Some(Value::Object(raw)) => raw,
        _ => return Err(CoreError::validation("you must include issue object").into()),
    };
    let fields = validation::issue_for_create(raw)?;
    let parent_id = parse_id(kind.as_str(), parent)?;

    let issue = IssueRepo::create(state.store.as_ref(), kind, parent_id, fields).await?;
    Ok((StatusCode::CREATED, Json(IssueView::from(&issue))))
}

async fn transfer(
    state: AppState,
    target: &str,
    body: IssuePostBody,
) -> AppResult<(StatusCode, Json<IssueView>)> {
    let target_kind = ParentKind::parse(Some(target)).map_err(|_| {
        CoreError::validation("transferto query must be 'sprint' or 'backlog'")
    })?;
    let issue = match &body.issue {
        Some(Value::String(id)) if !id.is_empty() => id.as_str(),
        _ => return Err(CoreError::validation("you must include issue property").into()),
    };
    let (kind, target_id) = body.parent()?;
    if kind != target_kind {
        return Err(CoreError::validation(format!(
            "transfer to {target_kind} requires a {target_kind} property"
        ))
        .into());
    }
    let issue_id = parse_id("issue", issue)?;
    let target_id = parse_id(kind.as_str(), target_id)?;

    let moved = IssueRepo::transfer(state.store.as_ref(), issue_id, target_kind, target_id).await?;
    Ok((StatusCode::CREATED, Json(IssueView::from(&moved))))
}

/// PATCH /issues/{id}?parent=sprint|backlog
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(params): ApiQuery<ParentParams>,
    ApiJson(raw): ApiJson<Map<String, Value>>,
) -> AppResult<Json<IssueView>> {
    let kind = params.kind()?;
    let fields = validation::issue_for_update(&raw)?;
    let issue_id = parse_id("issue", &id)?;

    let issue = IssueRepo::update(state.store.as_ref(), kind, issue_id, &fields).await?;
    Ok(Json(IssueView::from(&issue)))
}

/// DELETE /issues/{id}?parent=sprint|backlog
///
/// Responds with the issue that was removed, todos included.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(params): ApiQuery<ParentParams>,
) -> AppResult<Json<IssueView>> {
    let kind = params.kind()?;
    let issue_id = parse_id("issue", &id)?;

    let issue = IssueRepo::delete(state.store.as_ref(), kind, issue_id).await?;
    Ok(Json(IssueView::from(&issue)))
}
