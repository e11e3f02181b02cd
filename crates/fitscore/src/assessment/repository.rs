use serde::{Deserialize, Serialize};

use super::domain::{AnswerSet, CandidateId, CandidateRecord, FitTier};
use super::scoring::compute_fit;
use super::views::CandidateRow;

impl CandidateRecord {
    /// Dashboard row with the breakdown recomputed from the stored answers.
    pub fn row(&self) -> CandidateRow {
        let recomputed = compute_fit(&self.answers);
        CandidateRow {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            submitted_at: self.submitted_at,
            score: self.score.score,
            class: self.score.class,
            breakdown: recomputed.breakdown,
        }
    }

    /// Whether the stored score still matches a fresh computation of the answers.
    pub fn score_is_current(&self) -> bool {
        compute_fit(&self.answers) == self.score
    }

    pub fn submission_event(&self) -> SubmissionEvent {
        SubmissionEvent {
            candidate_id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            answers: self.answers,
            fitscore: self.score.score,
            fit_class: self.score.class,
        }
    }
}

/// Storage abstraction for scored candidates, supplied by the caller.
pub trait CandidateRepository: Send + Sync {
    fn insert(&self, record: CandidateRecord) -> Result<CandidateRecord, RepositoryError>;
    fn fetch(&self, id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError>;
    /// Every stored candidate, newest submission first.
    fn list(&self) -> Result<Vec<CandidateRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook fired after a candidate is stored (e.g. an automation webhook).
pub trait SubmissionNotifier: Send + Sync {
    fn notify(&self, event: SubmissionEvent) -> Result<(), NotifyError>;
}

/// Payload handed to the notifier: the submitted answers plus the computed score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionEvent {
    pub candidate_id: CandidateId,
    pub name: String,
    pub email: String,
    #[serde(flatten)]
    pub answers: AnswerSet,
    pub fitscore: f64,
    pub fit_class: FitTier,
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
