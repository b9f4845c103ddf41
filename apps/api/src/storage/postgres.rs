use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::records::{RecordStore, StoreError};
use crate::models::records::{Collection, InsertedId, StoredDocument};

/// Record store over the `documents` table. Rows are only ever inserted.
#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    data: Value,
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn insert(&self, collection: Collection, record: Value) -> Result<InsertedId, StoreError> {
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO documents (collection, data) VALUES ($1, $2) RETURNING id",
        )
        .bind(collection.as_str())
        .bind(&record)
        .fetch_one(&self.pool)
        .await?;

        debug!("Inserted document {id} into {collection}");
        Ok(InsertedId { id })
    }

    async fn list(&self, collection: Collection) -> Result<Vec<StoredDocument>, StoreError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, data FROM documents WHERE collection = $1 ORDER BY created_at ASC",
        )
        .bind(collection.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| StoredDocument::new(row.id, row.data))
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
