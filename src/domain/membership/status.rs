//! Membership subscription status.

use serde::{Deserialize, Serialize};

/// Membership subscription status.
///
/// Represents the current state of a user's subscription in the
/// payment lifecycle. Records are last-write-wins, so any status may
/// follow any other; there is no transition table.
///
/// Stored records may also carry the provider's raw status (`trialing`,
/// `unpaid`, ...); those are mapped on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum MembershipStatus {
    /// Checkout started but the first payment has not landed.
    /// No access until payment completes.
    Pending,

    /// Fully paid subscription with complete access.
    Active,

    /// Payment failed but within the provider's retry window.
    /// User retains access during retry attempts.
    PastDue,

    /// User requested cancellation.
    /// Access continues until period end.
    Cancelled,

    /// Subscription ended. No access.
    Expired,
}

impl MembershipStatus {
    /// Returns true if this status grants access to paid content.
    ///
    /// Access is granted for:
    /// - Active: Full paid access
    /// - PastDue: Grace period during payment retry
    /// - Cancelled: Until period end
    ///
    /// Access is denied for:
    /// - Pending: Awaiting first payment
    /// - Expired: Subscription ended
    pub fn has_access(&self) -> bool {
        matches!(
            self,
            MembershipStatus::Active | MembershipStatus::PastDue | MembershipStatus::Cancelled
        )
    }

    /// Maps a stored label or a payment provider subscription status onto ours.
    ///
    /// Returns `None` for statuses we do not recognise so callers can keep
    /// whatever status the record already had.
    pub fn from_provider_status(status: &str) -> Option<Self> {
        match status {
            "active" | "trialing" => Some(MembershipStatus::Active),
            "past_due" | "unpaid" => Some(MembershipStatus::PastDue),
            "canceled" | "cancelled" => Some(MembershipStatus::Cancelled),
            "pending" | "incomplete" | "paused" => Some(MembershipStatus::Pending),
            "incomplete_expired" | "expired" => Some(MembershipStatus::Expired),
            _ => None,
        }
    }

    /// Wire label, as written to stored records.
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Pending => "pending",
            MembershipStatus::Active => "active",
            MembershipStatus::PastDue => "past_due",
            MembershipStatus::Cancelled => "cancelled",
            MembershipStatus::Expired => "expired",
        }
    }
}

impl TryFrom<String> for MembershipStatus {
    type Error = String;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        MembershipStatus::from_provider_status(&label)
            .ok_or_else(|| format!("unknown membership status: {label}"))
    }
}

impl std::fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
