use super::common::*;
use crate::workflows::prequalification::domain::{ApplicationId, Field, LoanDecision};
use crate::workflows::prequalification::form::{
    interpret_response, LoanForm, SubmissionOutcome, TRANSPORT_FAILURE_MESSAGE,
};
use crate::workflows::prequalification::validation::FormValues;

fn decision() -> LoanDecision {
    LoanDecision {
        application_id: ApplicationId("3fa85f64-5717-4562-b3fc-2c963f66afa6".to_string()),
        eligible: true,
        reason: "Eligible under base rules".to_string(),
        timestamp: decision_time(),
    }
}

#[test]
fn correcting_a_field_removes_its_key() {
    let mut form = LoanForm::new();
    assert!(!form.validate());
    assert!(form.errors().contains(Field::Email));

    form.set_field(Field::Email, "john@example.com");

    assert!(!form.errors().contains(Field::Email));
    assert_eq!(form.errors().get(Field::Email), None);
    assert!(form.errors().contains(Field::FullName));
}

#[test]
fn editing_keeps_other_errors_until_revalidated() {
    let mut form = LoanForm::with_values(form_values());
    form.set_field(Field::Age, "0");
    assert!(!form.validate());
    assert_eq!(
        form.errors().get(Field::Age),
        Some("Age must be a number greater than 0")
    );

    form.set_field(Field::Age, "31");
    assert!(form.errors().is_empty());
    assert!(form.validate());
}

#[test]
fn submission_is_blocked_while_invalid() {
    let mut form = LoanForm::with_values(FormValues {
        email: "invalid".to_string(),
        ..form_values()
    });

    assert!(form.submission().is_none());
    assert_eq!(
        form.errors().get(Field::Email),
        Some("Please enter a valid email address")
    );
}

#[test]
fn submission_payload_is_canonical() {
    let mut form = LoanForm::with_values(form_values());

    let payload = form.submission().expect("valid form");

    assert_eq!(payload.phone_number.as_deref(), Some("0851234567"));
    assert_eq!(payload.monthly_income, Some(50_000.0));
    assert_eq!(payload.loan_amount, Some(240_000.0));
    assert_eq!(payload.age, Some(30.0));
    assert_eq!(payload.loan_purpose.as_deref(), Some("education"));
}

#[test]
fn successful_outcome_resets_the_form() {
    let mut form = LoanForm::with_values(form_values());
    form.record_outcome(SubmissionOutcome::Decided(decision()));

    assert_eq!(form.values(), &FormValues::default());
    assert!(form.last_outcome().is_some_and(SubmissionOutcome::is_success));

    form.set_field(Field::FullName, "Jane");
    assert!(form.last_outcome().is_none());
}

#[test]
fn rejected_outcome_keeps_the_values() {
    let mut form = LoanForm::with_values(form_values());
    form.record_outcome(SubmissionOutcome::Rejected {
        reason: "Phone number must be numeric".to_string(),
    });

    assert_eq!(form.values(), &form_values());
}

#[test]
fn interpret_response_reads_decisions() {
    let body = serde_json::to_vec(&decision()).expect("serializes");
    assert_eq!(
        interpret_response(200, &body),
        SubmissionOutcome::Decided(decision())
    );
}

#[test]
fn interpret_response_prefers_reason_then_message() {
    let outcome = interpret_response(
        400,
        br#"{"message":"Invalid request body","reason":"Age must be a number more than 0"}"#,
    );
    assert_eq!(outcome.message(), "Age must be a number more than 0");

    let outcome = interpret_response(400, br#"{"message":"Invalid request body"}"#);
    assert_eq!(outcome.message(), "Invalid request body");

    let outcome = interpret_response(500, br#"{"error":"internal server error"}"#);
    assert_eq!(outcome.message(), "Unknown error");
}

#[test]
fn unusable_bodies_map_to_transport_failure() {
    for (status, body) in [
        (502, &b"<html>bad gateway</html>"[..]),
        (200, &b"{}"[..]),
        (503, &b""[..]),
    ] {
        let outcome = interpret_response(status, body);
        assert_eq!(outcome, SubmissionOutcome::TransportFailed);
        assert_eq!(outcome.message(), TRANSPORT_FAILURE_MESSAGE);
    }
}
