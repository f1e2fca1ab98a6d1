//! File-based Blob Store Adapter
//!
//! Stores each blob as a file under `<base_path>/<namespace>/<key>`.
//! Keys may contain `/`, which maps onto subdirectories, so membership
//! records end up in `<base_path>/membership/users/`.

use async_trait::async_trait;
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs;

use crate::domain::membership::StoreError;
use crate::ports::BlobStore;

/// File-based storage for blobs
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    base_path: PathBuf,
    namespace: String,
}

impl FileBlobStore {
    /// Create a new file store rooted at `base_path`
    ///
    /// # Example
    /// ```ignore
    /// let store = FileBlobStore::new("./data/blobs", "membership");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P, namespace: impl Into<String>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            namespace: namespace.into(),
        }
    }

    /// Directory holding this namespace's blobs
    fn namespace_dir(&self) -> PathBuf {
        self.base_path.join(&self.namespace)
    }

    /// Resolve a key to a file path, refusing anything that could escape
    /// the namespace directory
    fn blob_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty() || key.contains('\\') {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        let relative = Path::new(key);
        let all_normal = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if !all_normal {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.namespace_dir().join(relative))
    }
}

#[async_trait]
impl BlobStore for FileBlobStore {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.blob_path(key)?;

        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::backend(e.to_string())),
        }
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        let path = self.blob_path(key)?;
        let dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.namespace_dir());

        fs::create_dir_all(&dir)
            .await
            .map_err(|e| StoreError::backend(e.to_string()))?;

        tokio::task::spawn_blocking(move || replace_file(&dir, &path, &bytes))
            .await
            .map_err(|e| StoreError::backend(e.to_string()))?
    }
}

/// Writes `bytes` to a fresh temp file in `dir`, then renames it over `path`.
///
/// Every write gets its own temp file, so concurrent writers to one key never
/// share a staging path and the last rename wins.
fn replace_file(dir: &Path, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let mut staged =
        NamedTempFile::new_in(dir).map_err(|e| StoreError::backend(e.to_string()))?;
    staged
        .write_all(bytes)
        .map_err(|e| StoreError::backend(e.to_string()))?;
    staged
        .persist(path)
        .map_err(|e| StoreError::backend(e.error.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, FileBlobStore) {
        let dir = TempDir::new().unwrap();
        let store = FileBlobStore::new(dir.path(), "membership");
        (dir, store)
    }

    #[tokio::test]
    async fn get_missing_key_returns_none() {
        let (_dir, store) = store();
        assert_eq!(store.get("users/nobody.json").await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_creates_nested_directories() {
        let (dir, store) = store();
        store
            .put("users/test%40example.com.json", b"{}".to_vec())
            .await
            .unwrap();

        let on_disk = dir
            .path()
            .join("membership")
            .join("users")
            .join("test%40example.com.json");
        assert!(on_disk.exists());
        assert_eq!(
            store.get("users/test%40example.com.json").await.unwrap(),
            Some(b"{}".to_vec())
        );
    }

    #[tokio::test]
    async fn put_overwrites_previous_value() {
        let (_dir, store) = store();
        store.put("users/a.json", b"one".to_vec()).await.unwrap();
        store.put("users/a.json", b"two".to_vec()).await.unwrap();

        assert_eq!(store.get("users/a.json").await.unwrap(), Some(b"two".to_vec()));
    }

    #[tokio::test]
    async fn concurrent_puts_to_one_key_all_succeed() {
        let (dir, store) = store();
        let key = "users/a%40b.jp.json";

        for round in 0..20 {
            let writers: Vec<_> = (0..8)
                .map(|writer| {
                    let store = store.clone();
                    let body = format!("{round}-{writer}").into_bytes();
                    tokio::spawn(async move { store.put(key, body).await })
                })
                .collect();

            for writer in writers {
                writer.await.unwrap().unwrap();
            }

            let stored = String::from_utf8(store.get(key).await.unwrap().unwrap()).unwrap();
            assert!(stored.starts_with(&format!("{round}-")));
        }

        let leftovers = std::fs::read_dir(dir.path().join("membership").join("users"))
            .unwrap()
            .count();
        assert_eq!(leftovers, 1);
    }

    #[tokio::test]
    async fn rejects_parent_directory_keys() {
        let (_dir, store) = store();
        let result = store.put("../escape.json", b"x".to_vec()).await;
        assert!(matches!(result, Err(StoreError::InvalidKey(_))));

        let result = store.get("users/../../escape.json").await;
        assert!(matches!(result, Err(StoreError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn rejects_absolute_and_empty_keys() {
        let (_dir, store) = store();
        assert!(matches!(
            store.get("/etc/passwd").await,
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(store.get("").await, Err(StoreError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn namespaces_are_isolated() {
        let dir = TempDir::new().unwrap();
        let membership = FileBlobStore::new(dir.path(), "membership");
        let other = FileBlobStore::new(dir.path(), "other");

        membership.put("users/a.json", b"v".to_vec()).await.unwrap();
        assert_eq!(other.get("users/a.json").await.unwrap(), None);
    }
}
