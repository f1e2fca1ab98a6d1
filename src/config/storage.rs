//! Blob storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::membership::MEMBERSHIP_NAMESPACE;

/// Which blob store backs the membership records
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local map; contents are lost on restart
    #[default]
    Memory,
    /// One file per key under `base_path/namespace`
    File,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Root directory for the file backend
    #[serde(default = "default_base_path")]
    pub base_path: PathBuf,

    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let namespace = self.namespace.trim();
        if namespace.is_empty() || namespace.contains(['/', '\\']) || namespace == ".." {
            return Err(ValidationError::InvalidNamespace);
        }
        if self.backend == StorageBackend::File && self.base_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__BASE_PATH"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            base_path: default_base_path(),
            namespace: default_namespace(),
        }
    }
}

fn default_base_path() -> PathBuf {
    PathBuf::from("./data/blobs")
}

fn default_namespace() -> String {
    MEMBERSHIP_NAMESPACE.to_string()
}
