//! Contract pricing.
//!
//! This is the only pricing implementation in the system. The web server uses
//! it for the authoritative quote attached to each contract, and the site's
//! live preview fetches the same numbers from `/api/quote` and `/api/pricing`.
//!
//! ## Formula
//!
//! ```text
//! total   = round(base[mission] * value[tier] * days * operators[count])
//! deposit = round(total / 2)
//! ```
//!
//! Every multiplier is a whole number of halves, so the arithmetic is done on
//! integers and the final rounding is exact half-up.

pub mod tiers;

use serde::Serialize;

pub use tiers::{parse_duration, OperatorCount, ValueTier};

/// Mission categories with a fixed base price in caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MissionType {
    Escort,
    Recon,
    Raid,
    Extraction,
    Bounty,
    Settlement,
    Training,
    Custom,
}

impl MissionType {
    /// All missions in declaration order.
    pub const ALL: [MissionType; 8] = [
        MissionType::Escort,
        MissionType::Recon,
        MissionType::Raid,
        MissionType::Extraction,
        MissionType::Bounty,
        MissionType::Settlement,
        MissionType::Training,
        MissionType::Custom,
    ];

    /// Lowercase key used in form field names (`value_<key>` etc).
    pub fn key(self) -> &'static str {
        match self {
            MissionType::Escort => "escort",
            MissionType::Recon => "recon",
            MissionType::Raid => "raid",
            MissionType::Extraction => "extraction",
            MissionType::Bounty => "bounty",
            MissionType::Settlement => "settlement",
            MissionType::Training => "training",
            MissionType::Custom => "custom",
        }
    }

    /// Base price in caps.
    pub fn base_price(self) -> u64 {
        match self {
            MissionType::Escort => 500,
            MissionType::Recon => 700,
            MissionType::Raid => 1200,
            MissionType::Extraction => 1500,
            MissionType::Bounty => 1000,
            MissionType::Settlement => 1000,
            MissionType::Training => 600,
            MissionType::Custom => 1000,
        }
    }

    /// Look up a mission by its exact key, ignoring case and surrounding space.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.key().eq_ignore_ascii_case(key))
    }
}

/// Authoritative price for a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    /// Full contract cost in caps
    pub total: u64,
    /// Up-front deposit in caps
    pub deposit: u64,
}

/// Compute the total and deposit for a mission.
pub fn quote(
    mission: MissionType,
    value: ValueTier,
    duration_days: u64,
    operators: OperatorCount,
) -> Quote {
    // Both multipliers are expressed in halves, hence the divisor of 4.
    let quarters = mission
        .base_price()
        .saturating_mul(value.multiplier_halves())
        .saturating_mul(duration_days)
        .saturating_mul(operators.multiplier_halves());

    let total = round_half_up(quarters, 4);
    let deposit = round_half_up(total, 2);

    Quote { total, deposit }
}

/// Quote straight from the raw strings a form submits.
///
/// Missing or unrecognised selections fall back to the cheapest option.
pub fn quote_from_choices(
    mission: MissionType,
    value: Option<&str>,
    duration: Option<&str>,
    operators: Option<&str>,
) -> Quote {
    quote(
        mission,
        value.map(ValueTier::parse).unwrap_or_default(),
        duration.map(parse_duration).unwrap_or(1),
        operators.map(OperatorCount::parse).unwrap_or_default(),
    )
}

fn round_half_up(numerator: u64, denominator: u64) -> u64 {
    numerator.saturating_add(denominator / 2) / denominator
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_price_at_lowest_tiers() {
        for mission in MissionType::ALL {
            let q = quote(mission, ValueTier::Low, 1, OperatorCount::One);
            let base = mission.base_price();
            assert_eq!(q.total, base);
            assert_eq!(q.deposit, (base + 1) / 2);
        }
    }

    #[test]
    fn test_raid_high_three_days_two_operators() {
        let q = quote(MissionType::Raid, ValueTier::High, 3, OperatorCount::Two);
        assert_eq!(q, Quote { total: 10800, deposit: 5400 });
    }

    #[test]
    fn test_escort_medium_two_days_three_operators() {
        let q = quote_from_choices(MissionType::Escort, Some("medium"), Some("2"), Some("3"));
        assert_eq!(q, Quote { total: 3000, deposit: 1500 });
    }

    #[test]
    fn test_unknown_tier_matches_low() {
        let unknown = quote_from_choices(MissionType::Recon, Some("legendary"), Some("2"), None);
        let low = quote_from_choices(MissionType::Recon, Some("low"), Some("2"), None);
        assert_eq!(unknown, low);
        assert_eq!(unknown.total, 1400);
    }

    #[test]
    fn test_missing_choices_default_to_cheapest() {
        let q = quote_from_choices(MissionType::Extraction, None, None, None);
        assert_eq!(q, Quote { total: 1500, deposit: 750 });
    }

    #[test]
    fn test_rounding_is_half_up_on_final_product() {
        // 700 * 1.5 * 1 * 1.5 = 1575, deposit 787.5 -> 788
        let q = quote(MissionType::Recon, ValueTier::Medium, 1, OperatorCount::Two);
        assert_eq!(q, Quote { total: 1575, deposit: 788 });

        // 1500 * 2.5 * 7 * 2.5 = 65625, deposit 32812.5 -> 32813
        let q = quote(MissionType::Extraction, ValueTier::Ultra, 7, OperatorCount::Four);
        assert_eq!(q, Quote { total: 65625, deposit: 32813 });
    }

    #[test]
    fn test_mission_from_key() {
        assert_eq!(MissionType::from_key("raid"), Some(MissionType::Raid));
        assert_eq!(MissionType::from_key(" Bounty "), Some(MissionType::Bounty));
        assert_eq!(MissionType::from_key("heist"), None);
    }
}
