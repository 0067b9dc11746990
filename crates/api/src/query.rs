//! Shared query parameter types for API handlers.

use scrumboard_core::error::CoreError;
use scrumboard_core::parent::ParentKind;
use scrumboard_db::models::parse_id;
use scrumboard_db::ObjectId;
use serde::Deserialize;

/// `?parent=sprint|backlog`, required by every nested issue/todo mutation.
#[derive(Debug, Deserialize)]
pub struct ParentParams {
    pub parent: Option<String>,
}

impl ParentParams {
    pub fn kind(&self) -> Result<ParentKind, CoreError> {
        ParentKind::parse(self.parent.as_deref())
    }
}

/// `?projectId=<id>` for project-scoped lookups.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectParams {
    pub project_id: Option<String>,
}

impl ProjectParams {
    pub fn project(&self) -> Result<ObjectId, CoreError> {
        match self.project_id.as_deref() {
            Some(raw) if !raw.is_empty() => parse_id("project", raw),
            _ => Err(CoreError::validation("projectId query parameter is required")),
        }
    }
}

/// `?transferto=sprint|backlog` on `POST /issues`.
#[derive(Debug, Deserialize)]
pub struct IssueCreateParams {
    pub transferto: Option<String>,
}
