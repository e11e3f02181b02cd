use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::aggregate::ALL_TIERS;
use super::domain::{AnswerSet, CandidateId, CandidateSubmission};
use super::repository::{CandidateRepository, RepositoryError, SubmissionNotifier};
use super::scoring::compute_fit;
use super::service::{CandidateService, CandidateServiceError};
use super::views::ScorePreview;
use crate::error::AppError;

/// Router builder exposing scoring, intake and dashboard endpoints.
pub fn candidate_router<R, N>(service: Arc<CandidateService<R, N>>) -> Router
where
    R: CandidateRepository + 'static,
    N: SubmissionNotifier + 'static,
{
    Router::new()
        .route("/api/v1/fitscore", post(preview_handler))
        .route(
            "/api/v1/candidates",
            post(submit_handler::<R, N>).get(dashboard_handler::<R, N>),
        )
        .route(
            "/api/v1/candidates/:candidate_id",
            get(detail_handler::<R, N>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DashboardQuery {
    #[serde(default)]
    pub(crate) class: Option<String>,
}

pub(crate) async fn preview_handler(Json(answers): Json<AnswerSet>) -> Json<ScorePreview> {
    let record = compute_fit(&answers);
    Json(ScorePreview {
        score: record.score,
        class: record.class,
        breakdown: record.breakdown,
    })
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<CandidateService<R, N>>>,
    Json(submission): Json<CandidateSubmission>,
) -> Response
where
    R: CandidateRepository + 'static,
    N: SubmissionNotifier + 'static,
{
    match service.submit(submission) {
        Ok(record) => (StatusCode::CREATED, Json(record.row())).into_response(),
        Err(error @ CandidateServiceError::Intake(_)) => AppError::from(error).into_response(),
        Err(CandidateServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({ "error": "candidate already exists" });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        Err(other) => internal_error(&other),
    }
}

pub(crate) async fn dashboard_handler<R, N>(
    State(service): State<Arc<CandidateService<R, N>>>,
    Query(query): Query<DashboardQuery>,
) -> Response
where
    R: CandidateRepository + 'static,
    N: SubmissionNotifier + 'static,
{
    let filter = query.class.as_deref().unwrap_or(ALL_TIERS);
    match service.dashboard(filter) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(other) => internal_error(&other),
    }
}

pub(crate) async fn detail_handler<R, N>(
    State(service): State<Arc<CandidateService<R, N>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    R: CandidateRepository + 'static,
    N: SubmissionNotifier + 'static,
{
    let id = CandidateId(candidate_id);
    match service.get(&id) {
        Ok(row) => (StatusCode::OK, Json(row)).into_response(),
        Err(CandidateServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "candidate_id": id.0,
                "error": "candidate not found",
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(other) => internal_error(&other),
    }
}

fn internal_error(error: &CandidateServiceError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
}
