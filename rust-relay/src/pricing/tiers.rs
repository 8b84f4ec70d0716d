//! Pricing factor selections and their parsing from form values.

use serde::Serialize;

/// Service value tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueTier {
    #[default]
    Low,
    Medium,
    High,
    Ultra,
}

impl ValueTier {
    pub const ALL: [ValueTier; 4] = [
        ValueTier::Low,
        ValueTier::Medium,
        ValueTier::High,
        ValueTier::Ultra,
    ];

    /// Parse a submitted tier. Anything unrecognised is `Low`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.key().eq_ignore_ascii_case(raw))
            .unwrap_or_default()
    }

    pub fn key(self) -> &'static str {
        match self {
            ValueTier::Low => "low",
            ValueTier::Medium => "medium",
            ValueTier::High => "high",
            ValueTier::Ultra => "ultra",
        }
    }

    /// Multiplier expressed in halves (1.5 -> 3).
    pub fn multiplier_halves(self) -> u64 {
        match self {
            ValueTier::Low => 2,
            ValueTier::Medium => 3,
            ValueTier::High => 4,
            ValueTier::Ultra => 5,
        }
    }

    pub fn multiplier(self) -> f64 {
        self.multiplier_halves() as f64 / 2.0
    }
}

/// Number of operators assigned to a contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum OperatorCount {
    #[default]
    One,
    Two,
    Three,
    Four,
}

impl OperatorCount {
    pub const ALL: [OperatorCount; 4] = [
        OperatorCount::One,
        OperatorCount::Two,
        OperatorCount::Three,
        OperatorCount::Four,
    ];

    /// Parse a submitted operator count. Out-of-range or garbage is `One`.
    pub fn parse(raw: &str) -> Self {
        match leading_number(raw) {
            Some(2) => OperatorCount::Two,
            Some(3) => OperatorCount::Three,
            Some(4) => OperatorCount::Four,
            _ => OperatorCount::One,
        }
    }

    pub fn count(self) -> u64 {
        match self {
            OperatorCount::One => 1,
            OperatorCount::Two => 2,
            OperatorCount::Three => 3,
            OperatorCount::Four => 4,
        }
    }

    /// Multiplier expressed in halves (2.5 -> 5).
    pub fn multiplier_halves(self) -> u64 {
        self.count() + 1
    }

    pub fn multiplier(self) -> f64 {
        self.multiplier_halves() as f64 / 2.0
    }
}

/// Parse a submitted duration in days.
///
/// Takes the leading digits (`"3 days"` is 3). Missing, garbage and zero
/// durations count as a single day.
pub fn parse_duration(raw: &str) -> u64 {
    match leading_number(raw) {
        Some(days) if days > 0 => days,
        _ => 1,
    }
}

/// Leading decimal digits of a trimmed string, if any.
fn leading_number(raw: &str) -> Option<u64> {
    let raw = raw.trim_start();
    let end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    raw[..end].parse().ok()
}
