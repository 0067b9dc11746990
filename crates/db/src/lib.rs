//! Document storage for sprints and backlogs.
//!
//! Exposes the [`store::DocumentStore`] seam with MongoDB and in-memory
//! implementations, the document models, and the repositories that perform
//! nested issue/todo mutations as explicit read-modify-write cycles.

use std::sync::Arc;

pub mod models;
pub mod repositories;
pub mod store;

pub use mongodb::bson::oid::ObjectId;

use store::{DocumentStore, MongoStore, StoreError};

/// Shared handle to whichever store backs the running server.
pub type Store = Arc<dyn DocumentStore>;

/// Connect to MongoDB and make sure the collection indexes exist.
pub async fn connect(uri: &str, database: &str) -> Result<Store, StoreError> {
    let store = MongoStore::connect(uri, database).await?;
    store.ensure_indexes().await?;
    Ok(Arc::new(store))
}

/// Round-trip to the store to confirm it is reachable.
pub async fn health_check(store: &dyn DocumentStore) -> Result<(), StoreError> {
    store.ping().await
}
