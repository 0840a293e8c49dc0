use super::common::*;
use crate::workflows::prequalification::domain::{
    ApplicationId, LoanApplicationRequest, LoanPurpose,
};
use crate::workflows::prequalification::service::{
    ApplicationIdGenerator, PrequalificationError, RandomApplicationIds,
};
use crate::workflows::prequalification::validation::RequestValidationError;
use std::collections::HashSet;

#[test]
fn submit_returns_positive_decision_with_fresh_identity() {
    let (service, ids) = build_service();

    let decision = service.submit(&valid_request()).expect("decided");

    assert!(decision.eligible);
    assert_eq!(decision.reason, "Eligible under base rules");
    assert_eq!(decision.application_id, ApplicationId("app-000001".to_string()));
    assert_eq!(decision.timestamp, decision_time());
    assert_eq!(ids.issued(), 1);
}

#[test]
fn ineligible_outcomes_are_still_decisions() {
    let (service, ids) = build_service();
    let mut request = valid_request();
    request.loan_purpose = Some("business".to_string());

    let decision = service.submit(&request).expect("decided");

    assert!(!decision.eligible);
    assert_eq!(decision.reason, "Business loans not supported");
    assert_eq!(ids.issued(), 1);
}

#[test]
fn rejected_submissions_never_allocate_an_identifier() {
    let (service, ids) = build_service();

    match service.submit(&LoanApplicationRequest::default()) {
        Err(PrequalificationError::Validation(RequestValidationError::MissingFields(fields))) => {
            assert_eq!(fields.len(), 7);
        }
        other => panic!("expected missing fields, got {other:?}"),
    }
    assert_eq!(ids.issued(), 0);
}

#[test]
fn every_decision_gets_a_distinct_identifier() {
    let (service, _) = build_service();

    let first = service.submit(&valid_request()).expect("decided");
    let second = service.submit(&valid_request()).expect("decided");

    assert_ne!(first.application_id, second.application_id);
}

#[test]
fn random_identifiers_are_uuid_shaped_and_unique() {
    let generator = RandomApplicationIds;
    let ids: HashSet<String> = (0..1_000).map(|_| generator.next_id().0).collect();

    assert_eq!(ids.len(), 1_000);
    for id in ids.iter().take(10) {
        let parsed = uuid::Uuid::parse_str(id).expect("uuid string");
        assert_eq!(parsed.get_version_num(), 4);
    }
}

#[test]
fn random_identifiers_stay_unique_across_threads() {
    let handles: Vec<_> = (0..8)
        .map(|_| {
            std::thread::spawn(|| {
                let generator = RandomApplicationIds;
                (0..250).map(|_| generator.next_id().0).collect::<Vec<_>>()
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for id in handle.join().expect("thread completes") {
            assert!(seen.insert(id), "duplicate identifier issued");
        }
    }
    assert_eq!(seen.len(), 2_000);
}

#[test]
fn decide_skips_validation_for_trusted_applications() {
    let (service, _) = build_service();
    let mut application = application();
    application.age = 61;

    let decision = service.decide(&application);

    assert!(!decision.eligible);
    assert_eq!(decision.reason, "Age not in range (must be between 20-60)");
}

#[test]
fn decide_agrees_with_the_engine_verdict() {
    let (service, _) = build_service();
    let mut application = application();

    for purpose in [LoanPurpose::Education, LoanPurpose::Business] {
        application.loan_purpose = purpose;
        let decision = service.decide(&application);
        let verdict = service.engine().evaluate(&application);
        assert_eq!(decision.eligible, verdict.is_eligible());
        assert_eq!(decision.reason, verdict.reason());
    }
}
