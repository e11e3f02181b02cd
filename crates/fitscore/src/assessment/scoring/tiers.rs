use super::super::domain::FitTier;

/// Lower bounds of each tier, evaluated top-down. A score equal to a bound
/// belongs to the higher tier.
const TIER_LADDER: [(f64, FitTier); 3] = [
    (80.0, FitTier::HighestFit),
    (60.0, FitTier::ApprovedFit),
    (40.0, FitTier::QuestionableFit),
];

/// Classifies an already rounded composite score.
pub fn classify(score: f64) -> FitTier {
    TIER_LADDER
        .iter()
        .find(|(minimum, _)| score >= *minimum)
        .map(|(_, tier)| *tier)
        .unwrap_or(FitTier::OutOfProfile)
}

/// Rounds a non-negative fraction to the nearest integer, halves rounding up.
pub(crate) fn round_half_up(numerator: u64, denominator: u64) -> u64 {
    (2 * numerator + denominator) / (2 * denominator)
}
