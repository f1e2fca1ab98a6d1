//! Blob Store Port - Interface for the durable key-value store.
//!
//! Membership records are opaque bytes to the store; decoding happens in the
//! accessor. Implementations are scoped to one namespace at construction.

use async_trait::async_trait;

use crate::domain::membership::StoreError;

/// Namespaced key-value blob storage.
///
/// Every call is a direct round-trip to the backend: no caching, no locking.
/// Concurrent puts to the same key resolve last-write-wins.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Namespace this handle reads and writes.
    fn namespace(&self) -> &str;

    /// Point read.
    ///
    /// # Returns
    /// `Ok(None)` when nothing is stored under `key`.
    ///
    /// # Errors
    /// Returns `StoreError` if the backend fails
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Stores `bytes` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns `StoreError` if the backend fails
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError>;
}
