use serde::Serialize;
use tracing::debug;

use super::domain::{CandidateRecord, FitTier};
use super::views::CandidateRow;

/// Sentinel filter value that keeps every candidate.
pub const ALL_TIERS: &str = "all";

/// Anything that carries a tier and can therefore be filtered and counted.
pub trait Classified {
    fn tier(&self) -> FitTier;
}

impl Classified for CandidateRecord {
    fn tier(&self) -> FitTier {
        self.score.class
    }
}

impl Classified for CandidateRow {
    fn tier(&self) -> FitTier {
        self.class
    }
}

/// Parsed form of the tier filter a reviewer selects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TierFilter {
    #[default]
    All,
    Only(FitTier),
    /// A value that names no tier; it matches nothing.
    Unrecognized(String),
}

impl TierFilter {
    pub fn parse(raw: &str) -> Self {
        if raw == ALL_TIERS {
            return Self::All;
        }
        match FitTier::from_label(raw) {
            Some(tier) => Self::Only(tier),
            None => Self::Unrecognized(raw.to_string()),
        }
    }

    pub fn matches(&self, tier: FitTier) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => *selected == tier,
            Self::Unrecognized(_) => false,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_TIERS,
            Self::Only(tier) => tier.label(),
            Self::Unrecognized(raw) => raw,
        }
    }
}

/// Candidate counts per tier over a whole population.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierDistribution {
    pub total: usize,
    pub highest_fit: usize,
    pub approved_fit: usize,
    pub questionable_fit: usize,
    pub out_of_profile: usize,
}

impl TierDistribution {
    fn record(&mut self, tier: FitTier) {
        self.total += 1;
        match tier {
            FitTier::HighestFit => self.highest_fit += 1,
            FitTier::ApprovedFit => self.approved_fit += 1,
            FitTier::QuestionableFit => self.questionable_fit += 1,
            FitTier::OutOfProfile => self.out_of_profile += 1,
        }
    }

    pub fn count(&self, tier: FitTier) -> usize {
        match tier {
            FitTier::HighestFit => self.highest_fit,
            FitTier::ApprovedFit => self.approved_fit,
            FitTier::QuestionableFit => self.questionable_fit,
            FitTier::OutOfProfile => self.out_of_profile,
        }
    }

    /// Whole percentage of the population in `tier`, halves rounding up.
    /// An empty population reports 0 for every tier.
    pub fn share_pct(&self, tier: FitTier) -> u8 {
        let total = self.total.max(1);
        let pct = (self.count(tier) * 200 + total) / (2 * total);
        pct.min(100) as u8
    }

    pub fn shares(&self) -> Vec<TierShare> {
        FitTier::ordered()
            .into_iter()
            .map(|tier| TierShare {
                tier,
                count: self.count(tier),
                share_pct: self.share_pct(tier),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierShare {
    pub tier: FitTier,
    pub count: usize,
    pub share_pct: u8,
}

/// Filtered listing plus the distribution of the unfiltered input.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation<T> {
    pub filtered: Vec<T>,
    pub distribution: TierDistribution,
}

/// Filters `candidates` by the raw filter value and counts tiers across the whole input.
///
/// Input order is preserved. `"all"` keeps everything; a value naming no tier yields an empty
/// listing while the distribution still covers every candidate.
pub fn aggregate<T>(candidates: &[T], filter_tier: &str) -> Aggregation<T>
where
    T: Classified + Clone,
{
    aggregate_with(candidates, &TierFilter::parse(filter_tier))
}

pub fn aggregate_with<T>(candidates: &[T], filter: &TierFilter) -> Aggregation<T>
where
    T: Classified + Clone,
{
    let mut distribution = TierDistribution::default();
    let mut filtered = Vec::new();

    for candidate in candidates {
        let tier = candidate.tier();
        distribution.record(tier);
        if filter.matches(tier) {
            filtered.push(candidate.clone());
        }
    }

    debug!(
        filter = filter.as_str(),
        total = distribution.total,
        retained = filtered.len(),
        "aggregated candidates"
    );

    Aggregation {
        filtered,
        distribution,
    }
}
