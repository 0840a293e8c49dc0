use super::common::*;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::prequalification::eligibility::EligibilityConfig;
use crate::workflows::prequalification::router::{prequalification_router, submit_handler};
use crate::workflows::prequalification::service::{Clock, PrequalificationService};
use chrono::{DateTime, Utc};

struct BrokenClock;

impl Clock for BrokenClock {
    fn now(&self) -> DateTime<Utc> {
        panic!("clock source unavailable")
    }
}

fn post_json(body: impl Into<axum::body::Body>) -> Request<axum::body::Body> {
    Request::post("/api/v1/loans")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("request builds")
}

#[tokio::test]
async fn submit_route_returns_decision_json() {
    let (service, _) = build_service();
    let router = prequalification_router(Arc::new(service));

    let response = router
        .oneshot(post_json(
            serde_json::to_vec(&valid_request()).expect("serializes"),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["applicationId"], "app-000001");
    assert_eq!(payload["eligible"], true);
    assert_eq!(payload["reason"], "Eligible under base rules");
    assert_eq!(payload["timestamp"], "2025-07-19T12:34:56Z");
}

#[tokio::test]
async fn submit_handler_returns_bad_request_for_validation_errors() {
    let (service, ids) = build_service();
    let mut request = valid_request();
    request.email = Some("invalid".to_string());

    let response = submit_handler(State(Arc::new(service)), Ok(axum::Json(request))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload,
        json!({
            "message": "Invalid request body",
            "reason": "Email must be a valid email address",
        })
    );
    assert_eq!(ids.issued(), 0);
}

#[tokio::test]
async fn empty_object_lists_all_missing_fields() {
    let (service, _) = build_service();
    let router = prequalification_router(Arc::new(service));

    let response = router
        .oneshot(post_json("{}"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["reason"],
        "missing required fields: fullName, monthlyIncome, loanAmount, loanPurpose, age, phoneNumber, email"
    );
    assert!(payload.get("applicationId").is_none());
}

#[tokio::test]
async fn malformed_json_uses_the_same_envelope() {
    let (service, _) = build_service();
    let router = prequalification_router(Arc::new(service));

    let response = router
        .oneshot(post_json(r#"{"fullName": "John Doe", "age": "thirty"}"#))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["message"], "Invalid request body");
    assert!(!payload["reason"].as_str().unwrap_or_default().is_empty());
}

#[tokio::test]
async fn ineligible_decisions_are_ok_responses() {
    let (service, _) = build_service();
    let router = prequalification_router(Arc::new(service));
    let mut request = valid_request();
    request.age = Some(19.0);

    let response = router
        .oneshot(post_json(serde_json::to_vec(&request).expect("serializes")))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["eligible"], false);
    assert_eq!(payload["reason"], "Age not in range (must be between 20-60)");
}

#[tokio::test]
async fn handler_faults_become_generic_internal_errors() {
    let ids = Arc::new(SequentialIds::default());
    let service = PrequalificationService::with_parts(
        EligibilityConfig::default(),
        ids.clone(),
        Arc::new(BrokenClock),
    );
    let router = prequalification_router(Arc::new(service));

    let response = router
        .oneshot(post_json(
            serde_json::to_vec(&valid_request()).expect("serializes"),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert_eq!(payload, json!({ "error": "internal server error" }));
    assert_eq!(ids.issued(), 0);
}
