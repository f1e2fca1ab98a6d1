//! MembershipStore - typed accessor over the membership blob namespace.
//!
//! Maps an email onto its storage key, reads or writes the JSON document,
//! and decodes it into a [`MembershipRecord`]. Every call is a single
//! round-trip to the injected [`BlobStore`]; nothing is cached or retried.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::foundation::Email;
use crate::domain::membership::{MembershipError, MembershipRecord, StorageKey, StoreError};
use crate::ports::BlobStore;

/// Reads and writes membership records.
#[derive(Clone)]
pub struct MembershipStore {
    blobs: Arc<dyn BlobStore>,
}

impl MembershipStore {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self { blobs }
    }

    /// Fetches the record stored for `email`.
    ///
    /// The email is encoded verbatim; callers that want case-insensitive
    /// lookups normalize before calling.
    ///
    /// # Errors
    ///
    /// - `MembershipError::NotFound` if nothing is stored under the key
    /// - `MembershipError::Store` if the backend fails or the stored
    ///   document is not a valid record (`StoreError::InvalidPayload`)
    pub async fn get_membership(&self, email: &Email) -> Result<MembershipRecord, MembershipError> {
        self.find_membership(email)
            .await?
            .ok_or_else(|| MembershipError::not_found(email.clone()))
    }

    /// Like [`get_membership`](Self::get_membership) but reports absence as `None`.
    pub async fn find_membership(
        &self,
        email: &Email,
    ) -> Result<Option<MembershipRecord>, StoreError> {
        let key = StorageKey::for_email(email);
        match self.read(&key).await? {
            Some(bytes) => decode(&key, &bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Returns the stored document for `email` byte for byte.
    ///
    /// The bytes are only returned once they decode as a record, so callers
    /// never pass on a document the rest of the service would reject.
    pub async fn get_stored_document(&self, email: &Email) -> Result<Vec<u8>, MembershipError> {
        let key = StorageKey::for_email(email);
        let bytes = self
            .read(&key)
            .await?
            .ok_or_else(|| MembershipError::not_found(email.clone()))?;
        decode(&key, &bytes)?;
        Ok(bytes)
    }

    async fn read(&self, key: &StorageKey) -> Result<Option<Vec<u8>>, StoreError> {
        debug!(namespace = self.blobs.namespace(), key = %key, "reading membership record");
        self.blobs.get(key.as_str()).await
    }

    /// Writes `record` under the key derived from its email.
    ///
    /// Last write wins; there is no version check.
    pub async fn put_membership(&self, record: &MembershipRecord) -> Result<(), StoreError> {
        let key = record.storage_key();
        let bytes = record
            .to_json_bytes()
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        debug!(namespace = self.blobs.namespace(), key = %key, "writing membership record");
        self.blobs.put(key.as_str(), bytes).await
    }
}

fn decode(key: &StorageKey, bytes: &[u8]) -> Result<MembershipRecord, StoreError> {
    MembershipRecord::from_json_bytes(bytes).map_err(|e| {
        warn!(key = %key, error = %e, "stored membership record failed to decode");
        StoreError::invalid_payload(e.to_string())
    })
}
