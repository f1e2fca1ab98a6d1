//! In-Memory Blob Store Adapter
//!
//! Keeps blobs in a process-local map. Useful for testing and development;
//! contents are lost on restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::membership::{StoreError, MEMBERSHIP_NAMESPACE};
use crate::ports::BlobStore;

/// In-memory storage for blobs
#[derive(Debug, Clone)]
pub struct InMemoryBlobStore {
    namespace: String,
    blobs: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryBlobStore {
    /// Create an empty store for the membership namespace
    pub fn new() -> Self {
        Self::with_namespace(MEMBERSHIP_NAMESPACE)
    }

    /// Create an empty store for an arbitrary namespace
    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            blobs: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let blobs = self.blobs.read().await;
        Ok(blobs.get(key).cloned())
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        let mut blobs = self.blobs.write().await;
        blobs.insert(key.to_string(), bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_missing_key_returns_none() {
        let store = InMemoryBlobStore::new();
        assert_eq!(store.get("users/nobody.json").await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_then_get_returns_bytes() {
        let store = InMemoryBlobStore::new();
        store.put("users/a.json", b"{}".to_vec()).await.unwrap();

        assert_eq!(store.get("users/a.json").await.unwrap(), Some(b"{}".to_vec()));
    }

    #[tokio::test]
    async fn put_overwrites_last_write_wins() {
        let store = InMemoryBlobStore::new();
        store.put("k", b"first".to_vec()).await.unwrap();
        store.put("k", b"second".to_vec()).await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), Some(b"second".to_vec()));
    }

    #[tokio::test]
    async fn clones_share_contents() {
        let store = InMemoryBlobStore::new();
        let other = store.clone();
        store.put("k", b"v".to_vec()).await.unwrap();

        assert_eq!(other.get("k").await.unwrap(), Some(b"v".to_vec()));
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let store = InMemoryBlobStore::new();
        store.put("users/a.json", b"a".to_vec()).await.unwrap();

        assert_eq!(store.get("users/b.json").await.unwrap(), None);
    }

    #[test]
    fn defaults_to_membership_namespace() {
        assert_eq!(InMemoryBlobStore::new().namespace(), "membership");
        assert_eq!(InMemoryBlobStore::with_namespace("other").namespace(), "other");
    }
}
