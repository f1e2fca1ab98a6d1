//! Membership-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | Store(_) | 500 |

use thiserror::Error;

use crate::domain::foundation::Email;

/// Failures talking to the blob store or decoding what it holds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The storage backend failed (I/O, network, ...).
    #[error("storage backend error: {0}")]
    Backend(String),

    /// The key cannot be addressed by this backend.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// The stored bytes are not a valid membership record.
    #[error("invalid membership payload: {0}")]
    InvalidPayload(String),

    /// The record could not be serialized for writing.
    #[error("failed to serialize membership: {0}")]
    Serialization(String),
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend(message.into())
    }

    pub fn invalid_payload(message: impl Into<String>) -> Self {
        StoreError::InvalidPayload(message.into())
    }
}

/// Errors returned by membership lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MembershipError {
    /// No record is stored for this email.
    #[error("No membership data found for: {0}")]
    NotFound(Email),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl MembershipError {
    pub fn not_found(email: Email) -> Self {
        MembershipError::NotFound(email)
    }

    /// Returns true for the absent-record case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, MembershipError::NotFound(_))
    }
}
