//! Candidate assessment: scoring of self-reported answers, tier classification and the
//! reviewer dashboard aggregation, plus the intake service and HTTP routes around them.

pub mod aggregate;
pub mod domain;
pub mod import;
pub(crate) mod intake;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use aggregate::{
    aggregate, aggregate_with, Aggregation, Classified, TierDistribution, TierFilter, TierShare,
    ALL_TIERS,
};
pub use domain::{
    AnswerSet, Breakdown, CandidateId, CandidateRecord, CandidateSubmission, Dimension, FitTier,
    Rating, ScoreRecord,
};
pub use import::{CandidateCsvImporter, ImportError};
pub use intake::IntakeError;
pub use repository::{
    CandidateRepository, NotifyError, RepositoryError, SubmissionEvent, SubmissionNotifier,
};
pub use router::candidate_router;
pub use scoring::{classify, compute_fit};
pub use service::{CandidateService, CandidateServiceError};
pub use views::{CandidateRow, DashboardView, ScorePreview};
