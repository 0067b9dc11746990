//! The storage seam between repositories and a concrete document database.

mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use scrumboard_core::parent::ParentKind;

use crate::models::parent::ParentDoc;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// The document kept changing underneath a read-modify-write cycle.
    #[error("{kind} {id} was modified concurrently, giving up after {attempts} attempts")]
    Conflict {
        kind: ParentKind,
        id: ObjectId,
        attempts: u32,
    },

    #[error("duplicate {kind} id {id}")]
    Duplicate { kind: ParentKind, id: ObjectId },
}

/// Which document(s) of a kind an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentFilter {
    Id(ObjectId),
    Project(ObjectId),
    /// Documents whose `issue` array holds an issue with this id.
    ContainsIssue(ObjectId),
    /// Documents holding a todo with this id under any of their issues.
    ContainsTodo(ObjectId),
}

impl ParentFilter {
    pub fn matches(&self, doc: &ParentDoc) -> bool {
        match *self {
            ParentFilter::Id(id) => doc.id == id,
            ParentFilter::Project(project) => doc.project == project,
            ParentFilter::ContainsIssue(issue) => doc.contains_issue(issue),
            ParentFilter::ContainsTodo(todo) => doc.contains_todo(todo),
        }
    }
}

/// Collection name for each parent kind.
pub fn collection_name(kind: ParentKind) -> &'static str {
    match kind {
        ParentKind::Sprint => "sprints",
        ParentKind::Backlog => "backlogs",
    }
}

/// Minimal document operations the repositories are written against.
///
/// Implementations only need per-document atomicity for [`replace`]; all
/// nested addressing happens in Rust on the fetched document.
///
/// [`replace`]: DocumentStore::replace
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// First document of `kind` matching `filter`, in insertion order.
    async fn find_one(
        &self,
        kind: ParentKind,
        filter: ParentFilter,
    ) -> Result<Option<ParentDoc>, StoreError>;

    async fn find_many(
        &self,
        kind: ParentKind,
        filter: ParentFilter,
    ) -> Result<Vec<ParentDoc>, StoreError>;

    async fn insert(&self, kind: ParentKind, doc: &ParentDoc) -> Result<(), StoreError>;

    /// Replace the stored document with `doc` if its stored revision is still
    /// `expected_revision`. Returns `false` when another writer got there first
    /// or the document no longer exists.
    async fn replace(
        &self,
        kind: ParentKind,
        doc: &ParentDoc,
        expected_revision: i64,
    ) -> Result<bool, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
