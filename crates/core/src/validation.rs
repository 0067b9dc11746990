//! Request-body validation for issue and todo payloads.
//!
//! Payloads arrive as free-form JSON objects. Every key is checked against a
//! whitelist before anything is deserialized, so a single unknown key rejects
//! the whole request and nothing is written.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::CoreError;

/// Fields a client may set on a todo.
pub const TODO_FIELDS: &[&str] = &["description", "status", "priority"];

/// Fields a client may set on an issue.
pub const ISSUE_FIELDS: &[&str] = &["description", "status", "priority"];

pub const INVALID_PROPERTIES: &str = "Invalid properties!";
pub const INVALID_UPDATES: &str = "Invalid updates!";
pub const NOTHING_TO_UPDATE: &str = "you must include at least one property to update";

/// The client-settable fields of an issue or todo.
///
/// `None` means "not supplied"; for updates only supplied fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemFields {
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

impl ItemFields {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.status.is_none() && self.priority.is_none()
    }
}

/// Reject the payload unless every key is in `allowed`.
pub fn ensure_allowed_fields(
    fields: &Map<String, Value>,
    allowed: &[&str],
    message: &str,
) -> Result<(), CoreError> {
    if fields.keys().all(|key| allowed.contains(&key.as_str())) {
        Ok(())
    } else {
        Err(CoreError::validation(message))
    }
}

/// Reject an update payload that carries no fields at all.
pub fn require_some_fields(fields: &Map<String, Value>) -> Result<(), CoreError> {
    if fields.is_empty() {
        Err(CoreError::validation(NOTHING_TO_UPDATE))
    } else {
        Ok(())
    }
}

pub fn require_non_empty(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        Err(CoreError::validation(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}

/// Reject explicit `null` values; a supplied field must carry a value.
pub fn reject_nulls(fields: &Map<String, Value>) -> Result<(), CoreError> {
    match fields.iter().find(|(_, value)| value.is_null()) {
        Some((key, _)) => Err(CoreError::validation(format!("{key} must not be null"))),
        None => Ok(()),
    }
}

/// Whitelist-check then deserialize a raw payload into [`ItemFields`].
pub fn parse_fields(
    raw: &Map<String, Value>,
    allowed: &[&str],
    message: &str,
) -> Result<ItemFields, CoreError> {
    ensure_allowed_fields(raw, allowed, message)?;
    reject_nulls(raw)?;
    serde_json::from_value(Value::Object(raw.clone()))
        .map_err(|e| CoreError::validation(format!("Invalid field value: {e}")))
}

/// Fields for a new todo. Any whitelisted subset is accepted, including none.
pub fn todo_for_create(raw: &Map<String, Value>) -> Result<ItemFields, CoreError> {
    parse_fields(raw, TODO_FIELDS, INVALID_PROPERTIES)
}

/// Fields for a todo update. At least one whitelisted field is required.
pub fn todo_for_update(raw: &Map<String, Value>) -> Result<ItemFields, CoreError> {
    let fields = parse_fields(raw, TODO_FIELDS, INVALID_UPDATES)?;
    require_some_fields(raw)?;
    Ok(fields)
}

/// Fields for a new issue. The description is mandatory and non-empty.
pub fn issue_for_create(raw: &Map<String, Value>) -> Result<ItemFields, CoreError> {
    let fields = parse_fields(raw, ISSUE_FIELDS, INVALID_PROPERTIES)?;
    match &fields.description {
        Some(description) => require_non_empty("description", description)?,
        None => return Err(CoreError::validation("issue description is required")),
    }
    Ok(fields)
}

/// Fields for an issue update. A supplied description must stay non-empty.
pub fn issue_for_update(raw: &Map<String, Value>) -> Result<ItemFields, CoreError> {
    let fields = parse_fields(raw, ISSUE_FIELDS, INVALID_UPDATES)?;
    require_some_fields(raw)?;
    if let Some(description) = &fields.description {
        require_non_empty("description", description)?;
    }
    Ok(fields)
}
