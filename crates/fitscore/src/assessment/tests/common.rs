use std::sync::{Arc, Mutex};

use axum::body::to_bytes;
use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::assessment::domain::{
    AnswerSet, CandidateId, CandidateRecord, CandidateSubmission,
};
use crate::assessment::repository::{
    CandidateRepository, NotifyError, RepositoryError, SubmissionEvent, SubmissionNotifier,
};
use crate::assessment::scoring::compute_fit;
use crate::assessment::service::CandidateService;

/// Lands exactly on 80.00.
pub(super) fn answers_at_80() -> AnswerSet {
    AnswerSet::from_ratings([4, 4, 4, 5, 5, 5, 5, 4, 4, 3])
}

/// Closest reachable score below 80: 79.79.
pub(super) fn answers_below_80() -> AnswerSet {
    AnswerSet::from_ratings([5, 5, 4, 5, 5, 5, 4, 3, 3, 3])
}

/// Lands exactly on 60.00.
pub(super) fn answers_at_60() -> AnswerSet {
    AnswerSet::from_ratings([4, 4, 4, 3, 3, 3, 3, 3, 3, 3])
}

/// Closest reachable score below 60: 59.79.
pub(super) fn answers_below_60() -> AnswerSet {
    AnswerSet::from_ratings([5, 5, 4, 2, 2, 2, 1, 4, 3, 3])
}

/// Lands exactly on 40.00.
pub(super) fn answers_at_40() -> AnswerSet {
    AnswerSet::from_ratings([2, 2, 2, 3, 3, 3, 3, 3, 3, 3])
}

/// Closest reachable score below 40: 39.79.
pub(super) fn answers_below_40() -> AnswerSet {
    AnswerSet::from_ratings([4, 4, 3, 2, 2, 2, 1, 2, 2, 2])
}

pub(super) fn submitted_at(offset_minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0)
        .single()
        .expect("valid timestamp")
        + Duration::minutes(offset_minutes)
}

pub(super) fn record(id: &str, answers: AnswerSet) -> CandidateRecord {
    CandidateRecord {
        id: CandidateId(id.to_string()),
        name: format!("Candidate {id}"),
        email: format!("{id}@example.com"),
        submitted_at: submitted_at(0),
        answers,
        score: compute_fit(&answers),
    }
}

pub(super) fn submission(name: &str, answers: AnswerSet) -> CandidateSubmission {
    CandidateSubmission {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        answers,
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<Vec<CandidateRecord>>>,
}

impl MemoryRepository {
    pub(super) fn seeded(records: Vec<CandidateRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }
}

impl CandidateRepository for MemoryRepository {
    fn insert(&self, record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("lock");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<CandidateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("lock");
        Ok(guard.iter().rev().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct UnavailableRepository;

impl CandidateRepository for UnavailableRepository {
    fn insert(&self, _record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn fetch(&self, _id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn list(&self) -> Result<Vec<CandidateRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    events: Arc<Mutex<Vec<SubmissionEvent>>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<SubmissionEvent> {
        self.events.lock().expect("lock").clone()
    }
}

impl SubmissionNotifier for MemoryNotifier {
    fn notify(&self, event: SubmissionEvent) -> Result<(), NotifyError> {
        self.events.lock().expect("lock").push(event);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(super) struct FailingNotifier;

impl SubmissionNotifier for FailingNotifier {
    fn notify(&self, _event: SubmissionEvent) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("webhook timed out".to_string()))
    }
}

pub(super) fn build_service() -> (
    CandidateService<MemoryRepository, MemoryNotifier>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifier>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = CandidateService::new(repository.clone(), notifier.clone());
    (service, repository, notifier)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("valid json")
}
