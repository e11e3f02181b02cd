mod rules;
mod tiers;

pub use tiers::classify;

use super::domain::{AnswerSet, Breakdown, ScoreRecord};
use rules::{composite_hundredths, tally};
use tiers::round_half_up;

/// Scores one answer set.
///
/// Every rating is clamped into `1..=5` (unreadable values count as 1) and mapped onto
/// `0..=100` in steps of 25. Each dimension is the plain mean of its answers and the
/// composite weighs performance at 40% and energy and culture at 30% each. The composite is
/// rounded to two decimals with halves rounding up; the rounding runs on the exact fraction,
/// so `59.995` always becomes `60.00`. The function is total and deterministic.
pub fn compute_fit(answers: &AnswerSet) -> ScoreRecord {
    let [performance, energy, culture] = tally(answers);
    let breakdown = Breakdown {
        performance: performance.mean(),
        energy: energy.mean(),
        culture: culture.mean(),
    };

    let (numerator, denominator) = composite_hundredths(&[performance, energy, culture]);
    let score = round_half_up(numerator, denominator) as f64 / 100.0;

    ScoreRecord {
        score,
        breakdown,
        class: classify(score),
    }
}

/// Fraction of the composite carried by a dimension, e.g. `0.4` for performance.
pub fn weight(dimension: super::domain::Dimension) -> f64 {
    f64::from(rules::weight_pct(dimension)) / 100.0
}
