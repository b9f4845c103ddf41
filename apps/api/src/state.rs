use std::sync::Arc;

use crate::extraction::TextExtractor;
use crate::storage::{LocalBlobStore, RecordStore};

/// Shared application state injected into all route handlers via Axum extractors.
/// Every collaborator is passed in at construction; nothing is a global.
#[derive(Clone)]
pub struct AppState {
    /// Document backend. Postgres in production, `MemoryRecordStore` without a database.
    pub records: Arc<dyn RecordStore>,
    pub blobs: LocalBlobStore,
    pub extractor: Arc<dyn TextExtractor>,
    /// Request body limit for uploads, in bytes.
    pub max_upload_bytes: usize,
}
