//! Issue and todo sub-documents, plus their JSON views.

use mongodb::bson::oid::ObjectId;
use scrumboard_core::validation::ItemFields;
use serde::{Deserialize, Serialize};

/// A sub-task stored inside an issue's `todo` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

impl Todo {
    /// Build a todo with a freshly generated id.
    pub fn new(fields: ItemFields) -> Self {
        Self {
            id: ObjectId::new(),
            description: fields.description,
            status: fields.status,
            priority: fields.priority,
        }
    }

    /// Overwrite only the supplied fields.
    pub fn apply(&mut self, fields: &ItemFields) {
        if let Some(description) = &fields.description {
            self.description = Some(description.clone());
        }
        if let Some(status) = &fields.status {
            self.status = Some(status.clone());
        }
        if let Some(priority) = &fields.priority {
            self.priority = Some(priority.clone());
        }
    }
}

/// A unit of work stored inside a sprint's or backlog's `issue` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default)]
    pub todo: Vec<Todo>,
}

impl Issue {
    /// Build an issue with a freshly generated id and no todos.
    ///
    /// Callers validate that `fields.description` is present beforehand.
    pub fn new(fields: ItemFields) -> Self {
        Self {
            id: ObjectId::new(),
            description: fields.description.unwrap_or_default(),
            status: fields.status,
            priority: fields.priority,
            todo: Vec::new(),
        }
    }

    pub fn apply(&mut self, fields: &ItemFields) {
        if let Some(description) = &fields.description {
            self.description = description.clone();
        }
        if let Some(status) = &fields.status {
            self.status = Some(status.clone());
        }
        if let Some(priority) = &fields.priority {
            self.priority = Some(priority.clone());
        }
    }

    pub fn todo_index(&self, todo_id: ObjectId) -> Option<usize> {
        self.todo.iter().position(|t| t.id == todo_id)
    }
}

/// JSON rendering of a [`Todo`] with its id as a hex string.
#[derive(Debug, Clone, Serialize)]
pub struct TodoView {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

impl From<&Todo> for TodoView {
    fn from(value: &Todo) -> Self {
        Self {
            id: value.id.to_hex(),
            description: value.description.clone(),
            status: value.status.clone(),
            priority: value.priority.clone(),
        }
    }
}

/// JSON rendering of an [`Issue`] and its todos.
#[derive(Debug, Clone, Serialize)]
pub struct IssueView {
    #[serde(rename = "_id")]
    pub id: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    pub todo: Vec<TodoView>,
}

impl From<&Issue> for IssueView {
    fn from(value: &Issue) -> Self {
        Self {
            id: value.id.to_hex(),
            description: value.description.clone(),
            status: value.status.clone(),
            priority: value.priority.clone(),
            todo: value.todo.iter().map(TodoView::from).collect(),
        }
    }
}
