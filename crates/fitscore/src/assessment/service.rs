use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::aggregate::{aggregate_with, TierFilter};
use super::domain::{CandidateId, CandidateRecord, CandidateSubmission};
use super::intake::{validate_identity, IntakeError};
use super::repository::{CandidateRepository, RepositoryError, SubmissionNotifier};
use super::scoring::compute_fit;
use super::views::{CandidateRow, DashboardView};

/// Service composing intake validation, scoring, storage and notification.
pub struct CandidateService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
    sequence: AtomicU64,
}

impl<R, N> CandidateService<R, N>
where
    R: CandidateRepository + 'static,
    N: SubmissionNotifier + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>) -> Self {
        Self {
            repository,
            notifier,
            sequence: AtomicU64::new(1),
        }
    }

    fn next_candidate_id(&self) -> CandidateId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        CandidateId(format!("cand-{id:06}"))
    }

    /// Validate, score and store a submission. Notification failures are logged and
    /// never fail the submission.
    pub fn submit(
        &self,
        submission: CandidateSubmission,
    ) -> Result<CandidateRecord, CandidateServiceError> {
        let identity = validate_identity(&submission)?;
        let score = compute_fit(&submission.answers);

        let record = CandidateRecord {
            id: self.next_candidate_id(),
            name: identity.name,
            email: identity.email,
            submitted_at: Utc::now(),
            answers: submission.answers,
            score,
        };

        let stored = self.repository.insert(record)?;
        info!(
            candidate_id = %stored.id,
            score = stored.score.score,
            class = stored.score.class.label(),
            "candidate submission scored"
        );

        if let Err(err) = self.notifier.notify(stored.submission_event()) {
            warn!(candidate_id = %stored.id, error = %err, "submission notification failed");
        }

        Ok(stored)
    }

    /// Build the reviewer dashboard for the raw filter value.
    pub fn dashboard(&self, filter_tier: &str) -> Result<DashboardView, CandidateServiceError> {
        let filter = TierFilter::parse(filter_tier);
        let rows: Vec<CandidateRow> = self
            .repository
            .list()?
            .iter()
            .map(row_for)
            .collect();

        let aggregation = aggregate_with(&rows, &filter);

        Ok(DashboardView {
            filter: filter.as_str().to_string(),
            distribution: aggregation.distribution,
            shares: aggregation.distribution.shares(),
            candidates: aggregation.filtered,
        })
    }

    pub fn get(&self, candidate_id: &CandidateId) -> Result<CandidateRow, CandidateServiceError> {
        let record = self
            .repository
            .fetch(candidate_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(row_for(&record))
    }
}

fn row_for(record: &CandidateRecord) -> CandidateRow {
    if !record.score_is_current() {
        warn!(
            candidate_id = %record.id,
            stored = record.score.score,
            "stored score differs from recomputed score"
        );
    }
    record.row()
}

/// Error raised by the candidate service.
#[derive(Debug, thiserror::Error)]
pub enum CandidateServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
