//! Repository for todos, nested two levels deep (parent -> issue -> todo).

use mongodb::bson::oid::ObjectId;
use scrumboard_core::error::CoreError;
use scrumboard_core::parent::ParentKind;
use scrumboard_core::validation::ItemFields;

use super::{ParentRepo, RepoError};
use crate::models::issue::Todo;
use crate::store::{DocumentStore, ParentFilter};

pub struct TodoRepo;

impl TodoRepo {
    /// Append a new todo to an issue, returning only the new todo.
    pub async fn create(
        store: &dyn DocumentStore,
        kind: ParentKind,
        issue_id: ObjectId,
        fields: ItemFields,
    ) -> Result<Todo, RepoError> {
        let todo = Todo::new(fields);
        let created = ParentRepo::modify(store, kind, ParentFilter::ContainsIssue(issue_id), |doc| {
            doc.push_todo(issue_id, todo.clone())
        })
        .await?
        .ok_or_else(|| CoreError::not_found("Issue", issue_id))?;

        tracing::debug!(todo_id = %created.id, %issue_id, %kind, "Created todo");
        Ok(created)
    }

    /// Update one todo inside one issue.
    ///
    /// No document holding the issue is an `Issue` not-found; the issue
    /// existing without that todo is a `Todo` not-found.
    pub async fn update(
        store: &dyn DocumentStore,
        kind: ParentKind,
        issue_id: ObjectId,
        todo_id: ObjectId,
        fields: &ItemFields,
    ) -> Result<Todo, RepoError> {
        ParentRepo::modify(store, kind, ParentFilter::ContainsIssue(issue_id), |doc| {
            doc.update_todo(issue_id, todo_id, fields)
        })
        .await?
        .ok_or_else(|| CoreError::not_found("Issue", issue_id).into())
    }

    /// Remove a todo from whichever issue holds it, returning the removed todo.
    pub async fn delete(
        store: &dyn DocumentStore,
        kind: ParentKind,
        todo_id: ObjectId,
    ) -> Result<Todo, RepoError> {
        let removed = ParentRepo::modify(store, kind, ParentFilter::ContainsTodo(todo_id), |doc| {
            doc.remove_todo(todo_id)
        })
        .await?
        .ok_or_else(|| CoreError::not_found("Todo", todo_id))?;

        tracing::debug!(%todo_id, %kind, "Deleted todo");
        Ok(removed)
    }
}
