use super::super::domain::{AnswerSet, Dimension, Rating};

/// Distance between adjacent points on the 0-100 scale.
pub(crate) const SCALE_STEP: u32 = 25;

pub(crate) const fn weight_pct(dimension: Dimension) -> u32 {
    match dimension {
        Dimension::Performance => 40,
        Dimension::Energy => 30,
        Dimension::Culture => 30,
    }
}

/// Maps a clamped rating onto {0, 25, 50, 75, 100}.
pub(crate) fn normalize(rating: Rating) -> u32 {
    u32::from(rating.clamped() - Rating::MIN) * SCALE_STEP
}

/// Sum of normalized answers within one dimension, kept as integers so the
/// composite can be rounded without binary floating point drift.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DimensionTally {
    pub dimension: Dimension,
    pub points: u32,
    pub answers: u32,
}

impl DimensionTally {
    pub fn mean(&self) -> f64 {
        if self.answers == 0 {
            return 0.0;
        }
        f64::from(self.points) / f64::from(self.answers)
    }
}

pub(crate) fn tally(answers: &AnswerSet) -> [DimensionTally; 3] {
    Dimension::ordered().map(|dimension| {
        let ratings = answers.ratings(dimension);
        DimensionTally {
            dimension,
            points: ratings.iter().copied().map(normalize).sum(),
            answers: ratings.len() as u32,
        }
    })
}

/// Weighted composite expressed in hundredths of a point as an exact fraction
/// `(numerator, denominator)`.
pub(crate) fn composite_hundredths(tallies: &[DimensionTally]) -> (u64, u64) {
    let denominator = tallies
        .iter()
        .filter(|tally| tally.answers > 0)
        .fold(1u64, |acc, tally| lcm(acc, u64::from(tally.answers)));

    let numerator = tallies
        .iter()
        .filter(|tally| tally.answers > 0)
        .map(|tally| {
            u64::from(weight_pct(tally.dimension))
                * u64::from(tally.points)
                * (denominator / u64::from(tally.answers))
        })
        .sum();

    (numerator, denominator)
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn lcm(a: u64, b: u64) -> u64 {
    a / gcd(a, b) * b
}
