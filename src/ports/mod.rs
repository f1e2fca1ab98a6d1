//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `BlobStore` - Namespaced key-value storage holding membership records
//! - `ExpiryNotifier` - Outbound trigger for the expiry notification run

mod blob_store;
mod expiry_notifier;

pub use blob_store::BlobStore;
pub use expiry_notifier::{ExpiryNotifier, NotifierError};
