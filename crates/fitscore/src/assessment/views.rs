use chrono::{DateTime, Utc};
use serde::Serialize;

use super::aggregate::{TierDistribution, TierShare};
use super::domain::{Breakdown, CandidateId, FitTier};

/// One row of the reviewer dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRow {
    pub id: CandidateId,
    pub name: String,
    pub email: String,
    pub submitted_at: DateTime<Utc>,
    pub score: f64,
    pub class: FitTier,
    pub breakdown: Breakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub filter: String,
    pub distribution: TierDistribution,
    pub shares: Vec<TierShare>,
    pub candidates: Vec<CandidateRow>,
}

/// Response for a score preview that is not persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorePreview {
    pub score: f64,
    pub class: FitTier,
    pub breakdown: Breakdown,
}
