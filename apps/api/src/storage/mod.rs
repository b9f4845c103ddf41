// Persistence adapters: the local blob store for uploaded files and the
// document-style record store (Postgres in production, in-memory otherwise).

pub mod blob;
pub mod memory;
pub mod postgres;
pub mod records;

pub use blob::{BlobError, LocalBlobStore};
pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;
pub use records::{RecordStore, RecordStoreExt};
