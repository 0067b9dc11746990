//! The `parent` selector: which collection an issue (and its todos) lives in.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Message returned whenever the `parent` query parameter is absent or unknown.
pub const PARENT_REQUIRED: &str =
    "you must provide parent query with value of 'sprint' or 'backlog'";

/// The two document kinds that own an ordered list of issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentKind {
    Sprint,
    Backlog,
}

impl ParentKind {
    pub const ALL: [ParentKind; 2] = [ParentKind::Sprint, ParentKind::Backlog];

    /// Parse the raw `parent` (or `transferto`) query value.
    ///
    /// Only the exact literals `sprint` and `backlog` are accepted.
    pub fn parse(raw: Option<&str>) -> Result<Self, CoreError> {
        match raw {
            Some("sprint") => Ok(ParentKind::Sprint),
            Some("backlog") => Ok(ParentKind::Backlog),
            _ => Err(CoreError::validation(PARENT_REQUIRED)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ParentKind::Sprint => "sprint",
            ParentKind::Backlog => "backlog",
        }
    }

    /// Human-readable entity name used in not-found messages.
    pub fn entity(self) -> &'static str {
        match self {
            ParentKind::Sprint => "Sprint",
            ParentKind::Backlog => "Backlog",
        }
    }
}

impl fmt::Display for ParentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
