//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Axum routers exposing the service
//! - `notifier` - Outbound expiry notification trigger
//! - `storage` - Blob stores holding membership records (in-memory, filesystem)
//! - `stripe` - Stripe webhook payload translation

pub mod http;
pub mod notifier;
pub mod storage;
pub mod stripe;

pub use notifier::HttpExpiryNotifier;
pub use storage::{FileBlobStore, InMemoryBlobStore};
