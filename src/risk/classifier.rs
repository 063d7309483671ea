// Normalized score -> risk tier
use crate::risk::{ClassificationResult, RiskTier};

/// `(exclusive upper bound, tier)` in ascending order; anything past the last
/// bound is `Extreme`.
const TIER_BRACKETS: [(f64, RiskTier); 4] = [
    (2.0, RiskTier::VeryLow),
    (4.0, RiskTier::Controlled),
    (6.0, RiskTier::Elevated),
    (8.0, RiskTier::Critical),
];

/// Tier of a normalized score. Total over `f64`: scores outside 0-10 (and NaN)
/// fall into the open-ended brackets.
pub fn risk_tier(score: f64) -> RiskTier {
    TIER_BRACKETS
        .iter()
        .find(|(bound, _)| score < *bound)
        .map(|(_, tier)| *tier)
        .unwrap_or(RiskTier::Extreme)
}

pub fn classify(score: f64) -> ClassificationResult {
    risk_tier(score).into()
}
