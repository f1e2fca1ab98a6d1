//! Foundation module - Shared domain primitives.
//!
//! Contains value objects and error types that form the vocabulary of the
//! membership domain.

mod email;
mod errors;
mod timestamp;

pub use email::Email;
pub use errors::ValidationError;
pub use timestamp::Timestamp;
