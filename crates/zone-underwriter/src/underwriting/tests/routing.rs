use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::underwriting::router::submit_handler;
use crate::underwriting::{DecisionRepository, FundParameterStore, UnderwritingService};

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
        .expect("request builds")
}

#[tokio::test]
async fn submit_route_returns_created_decision() {
    let (service, _, _) = build_service();
    let response = router_with_service(service)
        .oneshot(json_request(
            "POST",
            "/api/v1/underwriting/applications",
            serde_json::to_value(double_bay()).expect("serialize"),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["decision"]["approved"], true);
    assert_eq!(payload["decision"]["traffic_light"], "green");
    assert_eq!(
        payload["decision"]["returns"]["yearly_breakdown"]
            .as_array()
            .expect("breakdown")
            .len(),
        10
    );
}

#[tokio::test]
async fn submit_route_rejects_invalid_application() {
    let (service, _, _) = build_service();
    let mut application = serde_json::to_value(manly()).expect("serialize");
    application["loan_term"] = json!(0);

    let response = router_with_service(service)
        .oneshot(json_request(
            "POST",
            "/api/v1/underwriting/applications",
            application,
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("loan term"));
}

#[tokio::test]
async fn submit_handler_returns_conflict_on_duplicate() {
    let store = Arc::new(FundParameterStore::new(parameters()));
    let service = Arc::new(UnderwritingService::new(Arc::new(ConflictRepository), store));

    let response = submit_handler::<ConflictRepository>(State(service), axum::Json(kirribilli()))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn submit_handler_returns_internal_error_on_repository_failure() {
    let store = Arc::new(FundParameterStore::new(parameters()));
    let service = Arc::new(UnderwritingService::new(
        Arc::new(UnavailableRepository),
        store,
    ));

    let response =
        submit_handler::<UnavailableRepository>(State(service), axum::Json(kirribilli()))
            .await
            .into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn decision_route_finds_stored_records() {
    let (service, _, _) = build_service();
    let record = service.submit(manly()).expect("submission succeeds");
    let router = router_with_service(service);

    let response = router
        .clone()
        .oneshot(
            Request::get(format!(
                "/api/v1/underwriting/decisions/{}",
                record.decision_id
            ))
            .body(Body::empty())
            .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["decision_id"], record.decision_id.0.as_str());

    let response = router
        .clone()
        .oneshot(
            Request::get("/api/v1/underwriting/decisions/dec-424242")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = router
        .oneshot(
            Request::get("/api/v1/underwriting/decisions")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let listing = read_json_body(response).await;
    assert_eq!(listing.as_array().expect("listing").len(), 1);
    assert_eq!(listing[0]["property_address"], "15 Bower Street, Manly");
}

#[tokio::test]
async fn fund_parameter_routes_read_and_replace() {
    let (service, _, store) = build_service();
    let router = router_with_service(service);

    let response = router
        .clone()
        .oneshot(
            Request::get("/api/v1/fund/parameters")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let mut current = read_json_body(response).await;
    assert_eq!(current["max_ltv"], 75.0);

    current["max_ltv"] = json!(70.0);
    let response = router
        .clone()
        .oneshot(json_request("PUT", "/api/v1/fund/parameters", current))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.snapshot().max_ltv, 70.0);

    let response = router
        .oneshot(json_request(
            "PUT",
            "/api/v1/fund/parameters",
            json!({ "interest_rate": -1.0 }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(store.snapshot().interest_rate, 5.0);
}

#[tokio::test]
async fn submit_route_rejects_oversized_loan_term_without_storing() {
    let (service, repository, _) = build_service();
    let mut application = serde_json::to_value(double_bay()).expect("serialize");
    application["loan_term"] = json!(u32::MAX);

    let response = router_with_service(service)
        .oneshot(json_request(
            "POST",
            "/api/v1/underwriting/applications",
            application,
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("year limit"));
    assert!(repository.recent(10).expect("recent").is_empty());
}
