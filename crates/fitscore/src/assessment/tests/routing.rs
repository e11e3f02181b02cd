use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::assessment::domain::AnswerSet;
use crate::assessment::router::{candidate_router, detail_handler};

fn build_router() -> (axum::Router, Arc<MemoryNotifier>) {
    let (service, _, notifier) = build_service();
    (candidate_router(Arc::new(service)), notifier)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

fn submission_payload(name: &str, answers: AnswerSet) -> Value {
    serde_json::to_value(submission(name, answers)).expect("submission serializes")
}

#[tokio::test]
async fn preview_scores_without_storing() {
    let (router, notifier) = build_router();
    let answers = serde_json::to_value(answers_at_80()).expect("answers serialize");

    let response = router
        .oneshot(json_request("POST", "/api/v1/fitscore", answers))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["score"], json!(80.0));
    assert_eq!(payload["class"], json!("Highest Fit"));
    assert_eq!(payload["breakdown"]["E"], json!(100.0));
    let fields: Vec<&str> = payload
        .as_object()
        .map(|object| object.keys().map(String::as_str).collect())
        .unwrap_or_default();
    assert_eq!(fields, vec!["breakdown", "class", "score"]);
    assert!(notifier.events().is_empty());
}

#[test]
fn submission_payload_is_flat() {
    let payload = submission_payload("Ana", AnswerSet::uniform(4));

    assert_eq!(payload["name"], json!("Ana"));
    assert_eq!(payload["p_experience"], json!(4));
    assert_eq!(payload["c_collaboration"], json!(4));
}

#[tokio::test]
async fn post_candidates_returns_created_row() {
    let (router, notifier) = build_router();

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/candidates",
            submission_payload("Ana", answers_at_60()),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["id"], json!("cand-000001"));
    assert_eq!(payload["score"], json!(60.0));
    assert_eq!(payload["class"], json!("Approved Fit"));
    assert_eq!(notifier.events().len(), 1);
}

#[tokio::test]
async fn post_candidates_rejects_invalid_email() {
    let (router, notifier) = build_router();
    let mut payload = submission_payload("Ana", answers_at_60());
    payload["email"] = json!("not-an-email");

    let response = router
        .oneshot(json_request("POST", "/api/v1/candidates", payload))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap_or_default()
        .contains("not-an-email"));
    assert!(notifier.events().is_empty());
}

#[tokio::test]
async fn dashboard_filters_by_class_query() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);
    for (name, answers) in [
        ("Ana", answers_at_80()),
        ("Bruno", answers_below_80()),
        ("Carla", answers_below_40()),
    ] {
        service
            .submit(submission(name, answers))
            .expect("submission succeeds");
    }
    let router = candidate_router(service);

    let response = router
        .clone()
        .oneshot(get_request("/api/v1/candidates?class=Approved%20Fit"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["filter"], json!("Approved Fit"));
    assert_eq!(payload["distribution"]["total"], json!(3));
    let candidates = payload["candidates"].as_array().expect("candidates array");
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0]["name"], json!("Bruno"));

    let response = router
        .oneshot(get_request("/api/v1/candidates"))
        .await
        .expect("route executes");
    let payload = read_json_body(response).await;
    assert_eq!(payload["filter"], json!("all"));
    assert_eq!(payload["candidates"].as_array().map(Vec::len), Some(3));
    assert_eq!(payload["shares"].as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn dashboard_with_unknown_filter_is_empty_not_an_error() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);
    service
        .submit(submission("Ana", answers_at_80()))
        .expect("submission succeeds");

    let response = candidate_router(service)
        .oneshot(get_request("/api/v1/candidates?class=Fit%20Alt%C3%ADssimo"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["candidates"], json!([]));
    assert_eq!(payload["distribution"]["highest_fit"], json!(1));
}

#[tokio::test]
async fn detail_handler_returns_row_or_not_found() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);
    let record = service
        .submit(submission("Ana", answers_at_40()))
        .expect("submission succeeds");

    let response = detail_handler::<MemoryRepository, MemoryNotifier>(
        State(service.clone()),
        Path(record.id.0.clone()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["class"], json!("Questionable Fit"));

    let response = detail_handler::<MemoryRepository, MemoryNotifier>(
        State(service),
        Path("cand-missing".to_string()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["candidate_id"], json!("cand-missing"));
}
