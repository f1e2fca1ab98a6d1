//! Email address identifying a member.

use serde::{Deserialize, Serialize};

use super::errors::ValidationError;

/// Email address used as the membership primary key.
///
/// Kept verbatim: no trimming or case folding happens here, because the
/// storage key is derived from exactly what was stored. Callers that want a
/// normalized lookup use [`Email::normalized`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Creates an email, rejecting the empty string.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        Ok(Self(value))
    }

    /// Creates an email from user input: trimmed and lowercased.
    pub fn normalized(raw: &str) -> Result<Self, ValidationError> {
        Self::new(raw.trim().to_lowercase())
    }

    /// Returns the address as stored.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
