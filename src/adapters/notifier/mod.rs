//! Outbound notification adapters.

mod http_expiry_notifier;

pub use http_expiry_notifier::HttpExpiryNotifier;
