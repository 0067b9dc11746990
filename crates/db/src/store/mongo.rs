use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::error::{Error as MongoError, ErrorKind, WriteError, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use scrumboard_core::parent::ParentKind;

use super::{collection_name, DocumentStore, ParentFilter, StoreError};
use crate::models::parent::ParentDoc;

/// [`DocumentStore`] backed by a MongoDB database.
#[derive(Clone, Debug)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let options = ClientOptions::parse(uri).await?;
        let client = Client::with_options(options)?;
        Ok(Self {
            db: client.database(database),
        })
    }

    /// One backlog per project; lookups by nested id on both collections.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let unique = IndexOptions::builder().unique(true).build();
        self.collection(ParentKind::Backlog)
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "project": 1 })
                    .options(unique)
                    .build(),
                None,
            )
            .await?;
        self.collection(ParentKind::Sprint)
            .create_index(IndexModel::builder().keys(doc! { "project": 1 }).build(), None)
            .await?;

        for kind in ParentKind::ALL {
            let coll = self.collection(kind);
            coll.create_index(IndexModel::builder().keys(doc! { "issue._id": 1 }).build(), None)
                .await?;
            coll.create_index(
                IndexModel::builder().keys(doc! { "issue.todo._id": 1 }).build(),
                None,
            )
            .await?;
        }
        tracing::debug!("MongoDB indexes ensured");
        Ok(())
    }

    fn collection(&self, kind: ParentKind) -> Collection<ParentDoc> {
        self.db.collection(collection_name(kind))
    }
}

fn filter_document(filter: ParentFilter) -> Document {
    match filter {
        ParentFilter::Id(id) => doc! { "_id": id },
        ParentFilter::Project(project) => doc! { "project": project },
        ParentFilter::ContainsIssue(issue) => doc! { "issue._id": issue },
        ParentFilter::ContainsTodo(todo) => doc! { "issue.todo._id": todo },
    }
}

/// Server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

fn is_duplicate_key(err: &MongoError) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(WriteError { code: DUPLICATE_KEY, .. }))
    )
}

/// Match the document id at the expected revision. Documents written before
/// revisions existed have no field, which counts as revision 0.
fn revision_guard(doc: &ParentDoc, expected_revision: i64) -> Document {
    if expected_revision == 0 {
        doc! {
            "_id": doc.id,
            "$or": [
                { "revision": 0_i64 },
                { "revision": { "$exists": false } },
            ],
        }
    } else {
        doc! { "_id": doc.id, "revision": expected_revision }
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_one(
        &self,
        kind: ParentKind,
        filter: ParentFilter,
    ) -> Result<Option<ParentDoc>, StoreError> {
        Ok(self
            .collection(kind)
            .find_one(filter_document(filter), None)
            .await?)
    }

    async fn find_many(
        &self,
        kind: ParentKind,
        filter: ParentFilter,
    ) -> Result<Vec<ParentDoc>, StoreError> {
        let cursor = self
            .collection(kind)
            .find(filter_document(filter), None)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, kind: ParentKind, doc: &ParentDoc) -> Result<(), StoreError> {
        match self.collection(kind).insert_one(doc, None).await {
            Ok(_) => Ok(()),
            Err(err) if is_duplicate_key(&err) => Err(StoreError::Duplicate { kind, id: doc.id }),
            Err(err) => Err(err.into()),
        }
    }

    async fn replace(
        &self,
        kind: ParentKind,
        doc: &ParentDoc,
        expected_revision: i64,
    ) -> Result<bool, StoreError> {
        let result = self
            .collection(kind)
            .replace_one(revision_guard(doc, expected_revision), doc, None)
            .await?;
        Ok(result.matched_count == 1)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::oid::ObjectId;

    use super::*;

    #[test]
    fn filters_address_nested_ids_by_dotted_path() {
        let id = ObjectId::new();
        assert_eq!(filter_document(ParentFilter::ContainsIssue(id)), doc! { "issue._id": id });
        assert_eq!(
            filter_document(ParentFilter::ContainsTodo(id)),
            doc! { "issue.todo._id": id }
        );
        assert_eq!(filter_document(ParentFilter::Project(id)), doc! { "project": id });
    }

    #[test]
    fn revision_guard_pins_the_expected_revision() {
        let doc = ParentDoc::new(ObjectId::new(), None);
        let guard = revision_guard(&doc, 3);
        assert_eq!(guard.get_object_id("_id").unwrap(), doc.id);
        assert_eq!(guard.get_i64("revision").unwrap(), 3);
    }

    #[test]
    fn revision_guard_accepts_legacy_documents_at_zero() {
        let doc = ParentDoc::new(ObjectId::new(), None);
        let guard = revision_guard(&doc, 0);
        assert!(guard.get_array("$or").is_ok());
    }
}
