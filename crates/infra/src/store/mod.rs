//! Record storage: one keyed collection per record type.
//!
//! Services filter, order and paginate in memory on top of `list()`, so a
//! backend only needs keyed get/put/remove plus a full scan in key order.

pub mod in_memory;
pub mod postgres;
pub mod records;

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use in_memory::InMemoryRecordStore;
pub use postgres::PostgresRecordStore;

/// A persistable record with a stable collection name and key.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: &'static str;

    fn key(&self) -> Uuid;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store lock poisoned: {0}")]
    Poisoned(&'static str),

    #[error("database error in {operation}: {message}")]
    Database { operation: &'static str, message: String },

    #[error("failed to decode {collection} record: {message}")]
    Decode { collection: &'static str, message: String },
}

/// Keyed collection of records.
#[async_trait::async_trait]
pub trait RecordStore<T: Record>: Send + Sync {
    async fn get(&self, key: Uuid) -> Result<Option<T>, StoreError>;

    /// All records, ordered by key (UUIDv7 keys give creation order).
    async fn list(&self) -> Result<Vec<T>, StoreError>;

    /// Insert or replace.
    async fn put(&self, record: &T) -> Result<(), StoreError>;

    /// Returns whether a record was removed.
    async fn remove(&self, key: Uuid) -> Result<bool, StoreError>;
}

pub type Store<T> = Arc<dyn RecordStore<T>>;
