use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::records::{Collection, InsertedId, StoredDocument};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("record could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Append-only access to named collections of JSON documents.
///
/// Carried in `AppState` as `Arc<dyn RecordStore>`. Either a call succeeds as a
/// whole or it fails; there is no retry and no partial listing.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Stores `record` in `collection` and returns the identifier the backend assigned.
    async fn insert(&self, collection: Collection, record: Value) -> Result<InsertedId, StoreError>;

    /// Every record in `collection`, each carrying its `id`. Unpaginated.
    async fn list(&self, collection: Collection) -> Result<Vec<StoredDocument>, StoreError>;

    /// Cheap reachability probe used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Typed insert on top of the JSON-level trait.
#[async_trait]
pub trait RecordStoreExt: RecordStore {
    async fn insert_record<T>(&self, collection: Collection, record: &T) -> Result<InsertedId, StoreError>
    where
        T: Serialize + Sync,
    {
        let value = serde_json::to_value(record)?;
        self.insert(collection, value).await
    }
}

impl<S: RecordStore + ?Sized> RecordStoreExt for S {}
