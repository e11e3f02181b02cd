use fitscore::assessment::{
    AnswerSet, CandidateId, CandidateRecord, CandidateRepository, NotifyError, Rating,
    RepositoryError, SubmissionEvent, SubmissionNotifier,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local datastore; records are kept in submission order.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCandidateRepository {
    records: Arc<Mutex<Vec<CandidateRecord>>>,
}

impl CandidateRepository for InMemoryCandidateRepository {
    fn insert(&self, record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<CandidateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().rev().cloned().collect())
    }
}

/// Records submission events and logs the payload addressed to the configured webhook.
/// The HTTP delivery itself belongs to the automation platform behind the URL.
#[derive(Default, Clone)]
pub(crate) struct WebhookNotifier {
    target: Option<String>,
    events: Arc<Mutex<Vec<SubmissionEvent>>>,
}

impl WebhookNotifier {
    pub(crate) fn new(target: Option<String>) -> Self {
        Self {
            target,
            events: Arc::default(),
        }
    }

    pub(crate) fn events(&self) -> Vec<SubmissionEvent> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

impl SubmissionNotifier for WebhookNotifier {
    fn notify(&self, event: SubmissionEvent) -> Result<(), NotifyError> {
        let Some(target) = &self.target else {
            debug!(candidate_id = %event.candidate_id, "webhook disabled, skipping notification");
            return Ok(());
        };

        let payload = serde_json::to_string(&event)
            .map_err(|err| NotifyError::Transport(err.to_string()))?;
        info!(%target, candidate_id = %event.candidate_id, %payload, "submission notification queued");

        self.events
            .lock()
            .map_err(|_| NotifyError::Transport("notifier mutex poisoned".to_string()))?
            .push(event);
        Ok(())
    }
}

/// Parses `--answers` as ten comma separated ratings in form order.
pub(crate) fn parse_answers(raw: &str) -> Result<AnswerSet, String> {
    let values: Vec<i64> = raw
        .split(',')
        .map(|value| Rating::parse_lenient(value).raw())
        .collect();

    let ratings: [i64; AnswerSet::FIELD_COUNT] = values.try_into().map_err(|values: Vec<i64>| {
        format!(
            "expected {} comma separated ratings, got {}",
            AnswerSet::FIELD_COUNT,
            values.len()
        )
    })?;

    Ok(AnswerSet::from_ratings(ratings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fitscore::assessment::compute_fit;

    fn record(id: &str) -> CandidateRecord {
        let answers = AnswerSet::uniform(4);
        CandidateRecord {
            id: CandidateId(id.to_string()),
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            submitted_at: Utc::now(),
            answers,
            score: compute_fit(&answers),
        }
    }

    #[test]
    fn parse_answers_reads_ten_ratings() {
        let answers = parse_answers("4,4,4,5,5,5,5,4,4,3").expect("answers parse");
        assert_eq!(answers, AnswerSet::from_ratings([4, 4, 4, 5, 5, 5, 5, 4, 4, 3]));
    }

    #[test]
    fn parse_answers_keeps_unreadable_values_as_missing() {
        let answers = parse_answers("x, 2 ,3,3,3,3,3,3,3,3").expect("answers parse");
        assert_eq!(answers.p_experience, Rating::MISSING);
        assert_eq!(answers.p_delivery, Rating::new(2));
    }

    #[test]
    fn parse_answers_rejects_wrong_count() {
        let err = parse_answers("1,2,3").expect_err("too few ratings");
        assert!(err.contains("got 3"));
    }

    #[test]
    fn repository_lists_newest_first_and_rejects_duplicates() {
        let repository = InMemoryCandidateRepository::default();
        repository.insert(record("a")).expect("insert a");
        repository.insert(record("b")).expect("insert b");

        let ids: Vec<String> = repository
            .list()
            .expect("list")
            .into_iter()
            .map(|record| record.id.0)
            .collect();
        assert_eq!(ids, vec!["b".to_string(), "a".to_string()]);
        assert!(matches!(
            repository.insert(record("a")),
            Err(RepositoryError::Conflict)
        ));
    }

    #[test]
    fn notifier_without_target_records_nothing() {
        let notifier = WebhookNotifier::new(None);
        notifier
            .notify(record("a").submission_event())
            .expect("notify succeeds");
        assert!(notifier.events().is_empty());

        let notifier = WebhookNotifier::new(Some("https://hooks.example.com".to_string()));
        notifier
            .notify(record("a").submission_event())
            .expect("notify succeeds");
        assert_eq!(notifier.events().len(), 1);
    }
}
