//! Repository for issues nested inside sprints and backlogs.

use mongodb::bson::oid::ObjectId;
use scrumboard_core::error::CoreError;
use scrumboard_core::parent::ParentKind;
use scrumboard_core::validation::ItemFields;

use super::{ParentRepo, RepoError};
use crate::models::issue::Issue;
use crate::store::{DocumentStore, ParentFilter};

pub struct IssueRepo;

impl IssueRepo {
    /// Append a new issue to the given sprint or backlog.
    pub async fn create(
        store: &dyn DocumentStore,
        kind: ParentKind,
        parent_id: ObjectId,
        fields: ItemFields,
    ) -> Result<Issue, RepoError> {
        let issue = Issue::new(fields);
        let created = ParentRepo::modify(store, kind, ParentFilter::Id(parent_id), |doc| {
            Ok(doc.push_issue(issue.clone()))
        })
        .await?
        .ok_or_else(|| CoreError::not_found(kind.entity(), parent_id))?;

        tracing::debug!(issue_id = %created.id, %kind, %parent_id, "Created issue");
        Ok(created)
    }

    /// Apply the supplied fields to an issue, returning it as updated.
    pub async fn update(
        store: &dyn DocumentStore,
        kind: ParentKind,
        issue_id: ObjectId,
        fields: &ItemFields,
    ) -> Result<Issue, RepoError> {
        ParentRepo::modify(store, kind, ParentFilter::ContainsIssue(issue_id), |doc| {
            doc.update_issue(issue_id, fields)
        })
        .await?
        .ok_or_else(|| CoreError::not_found("Issue", issue_id).into())
    }

    /// Remove an issue, returning it as it was just before removal.
    pub async fn delete(
        store: &dyn DocumentStore,
        kind: ParentKind,
        issue_id: ObjectId,
    ) -> Result<Issue, RepoError> {
        ParentRepo::modify(store, kind, ParentFilter::ContainsIssue(issue_id), |doc| {
            doc.remove_issue(issue_id)
        })
        .await?
        .ok_or_else(|| CoreError::not_found("Issue", issue_id).into())
    }

    /// Move an issue from whichever parent currently holds it into the target.
    ///
    /// The issue is pushed into the target first and pulled from the source
    /// second. If the pull fails the push is undone, so a failed transfer never
    /// leaves the issue in both places.
    pub async fn transfer(
        store: &dyn DocumentStore,
        issue_id: ObjectId,
        target_kind: ParentKind,
        target_id: ObjectId,
    ) -> Result<Issue, RepoError> {
        let (source_kind, source) = ParentRepo::locate_issue(store, issue_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Issue", issue_id))?;

        if source_kind == target_kind && source.id == target_id {
            return Err(CoreError::validation(format!(
                "issue {issue_id} already belongs to {target_kind} {target_id}"
            ))
            .into());
        }

        let issue = source
            .find_issue(issue_id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("Issue", issue_id))?;

        ParentRepo::modify(store, target_kind, ParentFilter::Id(target_id), |doc| {
            Ok(doc.push_issue(issue.clone()))
        })
        .await?
        .ok_or_else(|| CoreError::not_found(target_kind.entity(), target_id))?;

        let pulled = ParentRepo::modify(store, source_kind, ParentFilter::Id(source.id), |doc| {
            doc.remove_issue(issue_id)
        })
        .await;

        match pulled {
            Ok(Some(moved)) => {
                tracing::debug!(
                    %issue_id,
                    from = %source_kind,
                    to = %target_kind,
                    %target_id,
                    "Transferred issue"
                );
                Ok(moved)
            }
            Ok(None) => {
                Self::undo_push(store, target_kind, target_id, issue_id).await?;
                Err(CoreError::not_found(source_kind.entity(), source.id).into())
            }
            Err(err) => {
                Self::undo_push(store, target_kind, target_id, issue_id).await?;
                Err(err)
            }
        }
    }

    /// Remove a pushed issue from the transfer target again.
    ///
    /// Failing to do so leaves the issue in two documents, which is reported
    /// as an internal error rather than the error that triggered the undo.
    async fn undo_push(
        store: &dyn DocumentStore,
        kind: ParentKind,
        parent_id: ObjectId,
        issue_id: ObjectId,
    ) -> Result<(), RepoError> {
        tracing::warn!(%issue_id, %kind, %parent_id, "Transfer failed after push, removing issue from target");
        let undo = ParentRepo::modify(store, kind, ParentFilter::Id(parent_id), |doc| {
            doc.remove_issue(issue_id)
        })
        .await;
        match undo {
            // Target gone or no longer holding the issue: nothing is duplicated.
            Ok(_) | Err(RepoError::Core(CoreError::NotFound { .. })) => Ok(()),
            Err(err) => {
                tracing::error!(%issue_id, %kind, %parent_id, error = %err, "Could not undo transfer push");
                Err(CoreError::Internal(format!(
                    "issue {issue_id} left in {kind} {parent_id} after a failed transfer: {err}"
                ))
                .into())
            }
        }
    }
}
