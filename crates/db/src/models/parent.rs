//! Sprint and backlog documents.
//!
//! Both kinds share one shape: a project reference and an ordered `issue`
//! array whose elements each carry an ordered `todo` array. The methods here
//! address those nested arrays in two steps (issue by id, then todo by id) and
//! hand back the element they created, changed, or removed.

use mongodb::bson::oid::ObjectId;
use scrumboard_core::error::CoreError;
use scrumboard_core::validation::ItemFields;
use serde::{Deserialize, Serialize};

use crate::models::issue::{Issue, IssueView, Todo};

/// A sprint or backlog document as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub project: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub issue: Vec<Issue>,
    /// Bumped on every replace; guards read-modify-write cycles.
    #[serde(default)]
    pub revision: i64,
}

impl ParentDoc {
    pub fn new(project: ObjectId, name: Option<String>) -> Self {
        Self {
            id: ObjectId::new(),
            project,
            name,
            issue: Vec::new(),
            revision: 0,
        }
    }

    pub fn issue_index(&self, issue_id: ObjectId) -> Option<usize> {
        self.issue.iter().position(|i| i.id == issue_id)
    }

    pub fn find_issue(&self, issue_id: ObjectId) -> Option<&Issue> {
        self.issue.iter().find(|i| i.id == issue_id)
    }

    pub fn contains_issue(&self, issue_id: ObjectId) -> bool {
        self.issue_index(issue_id).is_some()
    }

    /// Position of a todo anywhere in this document as `(issue, todo)` indexes.
    pub fn locate_todo(&self, todo_id: ObjectId) -> Option<(usize, usize)> {
        self.issue
            .iter()
            .enumerate()
            .find_map(|(i, issue)| issue.todo_index(todo_id).map(|t| (i, t)))
    }

    pub fn contains_todo(&self, todo_id: ObjectId) -> bool {
        self.locate_todo(todo_id).is_some()
    }

    fn issue_mut(&mut self, issue_id: ObjectId) -> Result<&mut Issue, CoreError> {
        self.issue
            .iter_mut()
            .find(|i| i.id == issue_id)
            .ok_or_else(|| CoreError::not_found("Issue", issue_id))
    }

    pub fn push_issue(&mut self, issue: Issue) -> Issue {
        self.issue.push(issue.clone());
        issue
    }

    pub fn update_issue(&mut self, issue_id: ObjectId, fields: &ItemFields) -> Result<Issue, CoreError> {
        let issue = self.issue_mut(issue_id)?;
        issue.apply(fields);
        Ok(issue.clone())
    }

    /// Remove an issue, returning it as it was just before removal.
    pub fn remove_issue(&mut self, issue_id: ObjectId) -> Result<Issue, CoreError> {
        let index = self
            .issue_index(issue_id)
            .ok_or_else(|| CoreError::not_found("Issue", issue_id))?;
        Ok(self.issue.remove(index))
    }

    /// Append a todo to the given issue's list.
    pub fn push_todo(&mut self, issue_id: ObjectId, todo: Todo) -> Result<Todo, CoreError> {
        let issue = self.issue_mut(issue_id)?;
        issue.todo.push(todo.clone());
        Ok(todo)
    }

    /// Update one todo addressed by its issue id and its own id.
    ///
    /// A missing issue and a missing todo are reported as distinct entities.
    pub fn update_todo(
        &mut self,
        issue_id: ObjectId,
        todo_id: ObjectId,
        fields: &ItemFields,
    ) -> Result<Todo, CoreError> {
        let issue = self.issue_mut(issue_id)?;
        let todo = issue
            .todo
            .iter_mut()
            .find(|t| t.id == todo_id)
            .ok_or_else(|| CoreError::not_found("Todo", todo_id))?;
        todo.apply(fields);
        Ok(todo.clone())
    }

    /// Remove a todo wherever it lives in this document.
    pub fn remove_todo(&mut self, todo_id: ObjectId) -> Result<Todo, CoreError> {
        let (issue, todo) = self
            .locate_todo(todo_id)
            .ok_or_else(|| CoreError::not_found("Todo", todo_id))?;
        Ok(self.issue[issue].todo.remove(todo))
    }
}

/// JSON rendering of a [`ParentDoc`]; the revision counter stays internal.
#[derive(Debug, Clone, Serialize)]
pub struct ParentView {
    #[serde(rename = "_id")]
    pub id: String,
    pub project: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub issue: Vec<IssueView>,
}

impl From<&ParentDoc> for ParentView {
    fn from(value: &ParentDoc) -> Self {
        Self {
            id: value.id.to_hex(),
            project: value.project.to_hex(),
            name: value.name.clone(),
            issue: value.issue.iter().map(IssueView::from).collect(),
        }
    }
}
