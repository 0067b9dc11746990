use std::collections::HashMap;

use async_trait::async_trait;
use scrumboard_core::parent::ParentKind;
use tokio::sync::RwLock;

use super::{DocumentStore, ParentFilter, StoreError};
use crate::models::parent::ParentDoc;

/// In-process [`DocumentStore`] keeping documents in insertion order.
///
/// Used by the test suites and by `STORE_BACKEND=memory` for throwaway local
/// runs. Nothing is persisted across restarts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: RwLock<HashMap<ParentKind, Vec<ParentDoc>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents of `kind`.
    pub async fn count(&self, kind: ParentKind) -> usize {
        self.docs.read().await.get(&kind).map_or(0, Vec::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_one(
        &self,
        kind: ParentKind,
        filter: ParentFilter,
    ) -> Result<Option<ParentDoc>, StoreError> {
        let docs = self.docs.read().await;
        Ok(docs
            .get(&kind)
            .and_then(|list| list.iter().find(|d| filter.matches(d)))
            .cloned())
    }

    async fn find_many(
        &self,
        kind: ParentKind,
        filter: ParentFilter,
    ) -> Result<Vec<ParentDoc>, StoreError> {
        let docs = self.docs.read().await;
        Ok(docs
            .get(&kind)
            .map(|list| list.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default())
    }

    async fn insert(&self, kind: ParentKind, doc: &ParentDoc) -> Result<(), StoreError> {
        let mut docs = self.docs.write().await;
        let list = docs.entry(kind).or_default();
        // Mirrors the unique index on `backlogs.project`.
        let clash = |d: &ParentDoc| {
            d.id == doc.id || (kind == ParentKind::Backlog && d.project == doc.project)
        };
        if list.iter().any(clash) {
            return Err(StoreError::Duplicate { kind, id: doc.id });
        }
        list.push(doc.clone());
        Ok(())
    }

    async fn replace(
        &self,
        kind: ParentKind,
        doc: &ParentDoc,
        expected_revision: i64,
    ) -> Result<bool, StoreError> {
        let mut docs = self.docs.write().await;
        let slot = docs
            .get_mut(&kind)
            .and_then(|list| list.iter_mut().find(|d| d.id == doc.id));
        match slot {
            Some(stored) if stored.revision == expected_revision => {
                *stored = doc.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
