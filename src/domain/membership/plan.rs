//! Subscription plans and the race entitlements they grant.
//!
//! A race day has `total_races` races numbered from 1. The main race is the
//! one before the last.
//!
//! | Plan | Races |
//! |------|-------|
//! | Free | main race only |
//! | Standard | last three races |
//! | Premium | every race |

use serde::{Deserialize, Serialize};

/// Races on a typical race day.
pub const DEFAULT_TOTAL_RACES: u32 = 12;

/// Membership subscription plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Standard,
    Premium,
}

impl Plan {
    /// Returns true if this plan is billed.
    pub fn is_paid(&self) -> bool {
        !matches!(self, Plan::Free)
    }

    /// Returns the display name for this plan.
    pub fn display_name(&self) -> &'static str {
        match self {
            Plan::Free => "Free",
            Plan::Standard => "Standard",
            Plan::Premium => "Premium",
        }
    }

    /// Wire label, as written to stored records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Standard => "standard",
            Plan::Premium => "premium",
        }
    }

    /// Monthly price in yen.
    pub fn monthly_price_yen(&self) -> u32 {
        match self {
            Plan::Free => 0,
            Plan::Standard => 5980,
            Plan::Premium => 9980,
        }
    }

    /// Returns true if this plan may see predictions for `race`.
    ///
    /// Races outside `1..=total_races` are never accessible.
    pub fn can_access_race(&self, race: u32, total_races: u32) -> bool {
        if race == 0 || race > total_races {
            return false;
        }
        match self {
            Plan::Free => total_races >= 2 && race == total_races - 1,
            Plan::Standard => race >= total_races.saturating_sub(2),
            Plan::Premium => true,
        }
    }

    /// Race numbers this plan can see on a day with `total_races` races.
    pub fn accessible_races(&self, total_races: u32) -> Vec<u32> {
        (1..=total_races)
            .filter(|race| self.can_access_race(*race, total_races))
            .collect()
    }

    /// Plans a member on this plan can move up to.
    pub fn upgrade_path(&self) -> &'static [Plan] {
        match self {
            Plan::Free => &[Plan::Standard, Plan::Premium],
            Plan::Standard => &[Plan::Premium],
            Plan::Premium => &[],
        }
    }

    /// Plans a member on this plan can move down to.
    pub fn downgrade_path(&self) -> &'static [Plan] {
        match self {
            Plan::Free => &[],
            Plan::Standard => &[Plan::Free],
            Plan::Premium => &[Plan::Standard, Plan::Free],
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Maps payment provider price ids onto plans.
///
/// Unknown or unconfigured prices resolve to [`Plan::Standard`]: a billing
/// event only exists for a paid subscription, so falling back to free would
/// lock paying members out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceCatalog {
    pub standard_price_id: Option<String>,
    pub premium_price_id: Option<String>,
}

impl PriceCatalog {
    pub fn new(standard_price_id: Option<String>, premium_price_id: Option<String>) -> Self {
        Self {
            standard_price_id,
            premium_price_id,
        }
    }

    /// Resolves the plan billed under `price_id`.
    pub fn plan_for_price(&self, price_id: &str) -> Plan {
        if self.premium_price_id.as_deref() == Some(price_id) {
            Plan::Premium
        } else {
            Plan::Standard
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_plan_is_not_paid() {
        assert!(!Plan::Free.is_paid());
        assert!(Plan::Standard.is_paid());
        assert!(Plan::Premium.is_paid());
    }

    #[test]
    fn free_sees_only_main_race() {
        assert_eq!(Plan::Free.accessible_races(12), vec![11]);
        assert_eq!(Plan::Free.accessible_races(10), vec![9]);
    }

    #[test]
    fn standard_sees_last_three_races() {
        assert_eq!(Plan::Standard.accessible_races(12), vec![10, 11, 12]);
    }

    #[test]
    fn standard_handles_huge_cards_without_overflow() {
        let total = u32::MAX;
        assert!(Plan::Standard.can_access_race(u32::MAX, total));
        assert!(Plan::Standard.can_access_race(u32::MAX - 2, total));
        assert!(!Plan::Standard.can_access_race(u32::MAX - 3, total));
    }

    #[test]
    fn standard_on_short_cards_sees_everything() {
        assert_eq!(Plan::Standard.accessible_races(1), vec![1]);
        assert_eq!(Plan::Standard.accessible_races(2), vec![1, 2]);
    }

    #[test]
    fn premium_sees_every_race() {
        assert_eq!(
            Plan::Premium.accessible_races(DEFAULT_TOTAL_RACES),
            (1..=12).collect::<Vec<_>>()
        );
    }

    #[test]
    fn out_of_range_races_are_never_accessible() {
        for plan in [Plan::Free, Plan::Standard, Plan::Premium] {
            assert!(!plan.can_access_race(0, 12));
            assert!(!plan.can_access_race(13, 12));
        }
    }

    #[test]
    fn tiny_race_days_do_not_underflow() {
        assert!(Plan::Free.accessible_races(1).is_empty());
        assert_eq!(Plan::Standard.accessible_races(2), vec![1, 2]);
        assert!(Plan::Free.accessible_races(0).is_empty());
    }

    #[test]
    fn upgrade_and_downgrade_paths() {
        assert_eq!(Plan::Free.upgrade_path(), &[Plan::Standard, Plan::Premium]);
        assert!(Plan::Premium.upgrade_path().is_empty());
        assert_eq!(Plan::Premium.downgrade_path(), &[Plan::Standard, Plan::Free]);
        assert!(Plan::Free.downgrade_path().is_empty());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Plan::Premium).unwrap(), "\"premium\"");
        let plan: Plan = serde_json::from_str("\"standard\"").unwrap();
        assert_eq!(plan, Plan::Standard);
    }

    #[test]
    fn catalog_resolves_configured_premium_price() {
        let catalog = PriceCatalog::new(
            Some("price_std".to_string()),
            Some("price_prm".to_string()),
        );
        assert_eq!(catalog.plan_for_price("price_prm"), Plan::Premium);
        assert_eq!(catalog.plan_for_price("price_std"), Plan::Standard);
    }

    #[test]
    fn catalog_falls_back_to_standard() {
        let catalog = PriceCatalog::default();
        assert_eq!(catalog.plan_for_price("price_unknown"), Plan::Standard);
    }
}
