//! Repository for sprint and backlog documents.

use mongodb::bson::oid::ObjectId;
use scrumboard_core::error::CoreError;
use scrumboard_core::parent::ParentKind;

use super::RepoError;
use crate::models::parent::ParentDoc;
use crate::store::{DocumentStore, ParentFilter, StoreError};

/// How many times a read-modify-write cycle is retried after losing a race.
const MAX_ATTEMPTS: u32 = 5;

/// Lookups and creation of parent documents, plus the shared mutation cycle.
pub struct ParentRepo;

impl ParentRepo {
    pub async fn find_by_id(
        store: &dyn DocumentStore,
        kind: ParentKind,
        id: ObjectId,
    ) -> Result<Option<ParentDoc>, StoreError> {
        store.find_one(kind, ParentFilter::Id(id)).await
    }

    /// The single backlog belonging to a project, if it has one.
    pub async fn find_backlog_by_project(
        store: &dyn DocumentStore,
        project: ObjectId,
    ) -> Result<Option<ParentDoc>, StoreError> {
        store
            .find_one(ParentKind::Backlog, ParentFilter::Project(project))
            .await
    }

    pub async fn list_sprints_by_project(
        store: &dyn DocumentStore,
        project: ObjectId,
    ) -> Result<Vec<ParentDoc>, StoreError> {
        store
            .find_many(ParentKind::Sprint, ParentFilter::Project(project))
            .await
    }

    /// Create the backlog for a project. A project owns at most one.
    pub async fn create_backlog(
        store: &dyn DocumentStore,
        project: ObjectId,
    ) -> Result<ParentDoc, RepoError> {
        if Self::find_backlog_by_project(store, project).await?.is_some() {
            return Err(CoreError::Conflict(format!("project {project} already has a backlog")).into());
        }
        let backlog = ParentDoc::new(project, None);
        // A concurrent create can slip past the lookup; the store's
        // uniqueness check then reports it.
        match store.insert(ParentKind::Backlog, &backlog).await {
            Ok(()) => {}
            Err(StoreError::Duplicate { .. }) => {
                return Err(CoreError::Conflict(format!("project {project} already has a backlog")).into());
            }
            Err(err) => return Err(err.into()),
        }
        tracing::debug!(backlog_id = %backlog.id, %project, "Created backlog");
        Ok(backlog)
    }

    pub async fn create_sprint(
        store: &dyn DocumentStore,
        project: ObjectId,
        name: Option<String>,
    ) -> Result<ParentDoc, StoreError> {
        let sprint = ParentDoc::new(project, name);
        store.insert(ParentKind::Sprint, &sprint).await?;
        tracing::debug!(sprint_id = %sprint.id, %project, "Created sprint");
        Ok(sprint)
    }

    /// Find the parent currently holding an issue, searching sprints first.
    pub async fn locate_issue(
        store: &dyn DocumentStore,
        issue_id: ObjectId,
    ) -> Result<Option<(ParentKind, ParentDoc)>, StoreError> {
        for kind in ParentKind::ALL {
            if let Some(doc) = store.find_one(kind, ParentFilter::ContainsIssue(issue_id)).await? {
                return Ok(Some((kind, doc)));
            }
        }
        Ok(None)
    }

    /// Fetch the first document matching `filter`, apply `mutate`, and write it
    /// back guarded by its revision.
    ///
    /// Returns `Ok(None)` when no document matches. An error from `mutate`
    /// aborts the cycle without writing anything. Losing a race re-reads the
    /// document and runs `mutate` again on the fresh copy.
    pub async fn modify<T, F>(
        store: &dyn DocumentStore,
        kind: ParentKind,
        filter: ParentFilter,
        mut mutate: F,
    ) -> Result<Option<T>, RepoError>
    where
        F: FnMut(&mut ParentDoc) -> Result<T, CoreError> + Send,
        T: Send,
    {
        let mut last_id = None;
        for attempt in 1..=MAX_ATTEMPTS {
            let Some(mut doc) = store.find_one(kind, filter).await? else {
                return Ok(None);
            };
            let expected = doc.revision;
            let out = mutate(&mut doc)?;
            doc.revision = expected + 1;

            if store.replace(kind, &doc, expected).await? {
                return Ok(Some(out));
            }
            tracing::debug!(%kind, id = %doc.id, attempt, "Revision moved, retrying");
            last_id = Some(doc.id);
        }

        match last_id {
            Some(id) => Err(StoreError::Conflict {
                kind,
                id,
                attempts: MAX_ATTEMPTS,
            }
            .into()),
            None => Ok(None),
        }
    }
}
