use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::records::{RecordStore, StoreError};
use crate::models::records::{Collection, InsertedId, StoredDocument};

/// In-process record store. Used when no database is configured and as the
/// fake backend in handler tests. Listing returns insertion order.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    collections: RwLock<HashMap<Collection, Vec<(Uuid, Value)>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert(&self, collection: Collection, record: Value) -> Result<InsertedId, StoreError> {
        let id = Uuid::new_v4();
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .push((id, record));
        Ok(InsertedId { id })
    }

    async fn list(&self, collection: Collection) -> Result<Vec<StoredDocument>, StoreError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, data)| StoredDocument::new(*id, data.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_then_list_carries_id() {
        let store = MemoryRecordStore::new();
        let inserted = store
            .insert(Collection::Resumes, json!({ "name": "A" }))
            .await
            .unwrap();

        let docs = store.list(Collection::Resumes).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, inserted.id);
        assert_eq!(docs[0].fields["name"], json!("A"));
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = MemoryRecordStore::new();
        store
            .insert(Collection::ParsedResumes, json!({ "file_name": "cv.pdf" }))
            .await
            .unwrap();

        assert!(store.list(Collection::Resumes).await.unwrap().is_empty());
        assert_eq!(store.list(Collection::ParsedResumes).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let store = MemoryRecordStore::new();
        let a = store.insert(Collection::Resumes, json!({})).await.unwrap();
        let b = store.insert(Collection::Resumes, json!({})).await.unwrap();
        assert_ne!(a.id, b.id);
    }
}
