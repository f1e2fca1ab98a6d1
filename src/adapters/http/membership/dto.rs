//! Request and response types for membership endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::membership::{MembershipRecord, Plan};

// ════════════════════════════════════════════════════════════════════════════════
// Request Query Parameters
// ════════════════════════════════════════════════════════════════════════════════

/// `?email=` query shared by the lookup endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

impl EmailQuery {
    /// The email parameter, or `None` when absent or empty.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.is_empty())
    }
}

/// Query for the race access check.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RaceAccessQuery {
    pub email: Option<String>,
    pub race: Option<u32>,
    pub total_races: Option<u32>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response Types
// ════════════════════════════════════════════════════════════════════════════════

/// Body of the public lookup.
#[derive(Debug, Clone, Serialize)]
pub struct LookupResponse {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<MembershipRecord>,
}

impl LookupResponse {
    pub fn found(record: MembershipRecord) -> Self {
        Self {
            found: true,
            data: Some(record),
        }
    }

    pub fn not_found() -> Self {
        Self {
            found: false,
            data: None,
        }
    }
}

/// Body of the race access check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RaceAccessResponse {
    pub email: String,
    pub plan: Plan,
    pub race: u32,
    pub total_races: u32,
    pub allowed: bool,
}

/// JSON error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Short machine-readable error label.
    pub error: String,
    /// Internal message, only when verbose errors are enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}
