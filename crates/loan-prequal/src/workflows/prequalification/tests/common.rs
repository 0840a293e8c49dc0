use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::prequalification::domain::{
    ApplicationId, LoanApplication, LoanApplicationRequest, LoanPurpose,
};
use crate::workflows::prequalification::eligibility::{EligibilityConfig, EligibilityEngine};
use crate::workflows::prequalification::service::{
    ApplicationIdGenerator, Clock, PrequalificationService,
};
use crate::workflows::prequalification::validation::FormValues;

pub(super) fn valid_request() -> LoanApplicationRequest {
    LoanApplicationRequest {
        full_name: Some("John Doe".to_string()),
        phone_number: Some("0851234567".to_string()),
        monthly_income: Some(50_000.0),
        loan_amount: Some(240_000.0),
        loan_purpose: Some("education".to_string()),
        age: Some(30.0),
        email: Some("john@example.com".to_string()),
    }
}

pub(super) fn application() -> LoanApplication {
    LoanApplication {
        full_name: "John Doe".to_string(),
        phone_number: "0851234567".to_string(),
        monthly_income: 50_000.0,
        loan_amount: 240_000.0,
        loan_purpose: LoanPurpose::Education,
        age: 30,
        email: "john@example.com".to_string(),
    }
}

pub(super) fn form_values() -> FormValues {
    FormValues {
        full_name: "John Doe".to_string(),
        phone_number: "085-123-4567".to_string(),
        monthly_income: "50,000".to_string(),
        loan_amount: "240000".to_string(),
        loan_purpose: "education".to_string(),
        age: "30".to_string(),
        email: "john@example.com".to_string(),
    }
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(EligibilityConfig::default())
}

pub(super) fn decision_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 19, 12, 34, 56)
        .single()
        .expect("valid timestamp")
}

pub(super) struct FixedClock(pub(super) DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Default)]
pub(super) struct SequentialIds {
    issued: AtomicUsize,
}

impl SequentialIds {
    pub(super) fn issued(&self) -> usize {
        self.issued.load(Ordering::SeqCst)
    }
}

impl ApplicationIdGenerator for SequentialIds {
    fn next_id(&self) -> ApplicationId {
        let next = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        ApplicationId(format!("app-{next:06}"))
    }
}

pub(super) fn build_service() -> (
    PrequalificationService<SequentialIds, FixedClock>,
    Arc<SequentialIds>,
) {
    let ids = Arc::new(SequentialIds::default());
    let service = PrequalificationService::with_parts(
        EligibilityConfig::default(),
        ids.clone(),
        Arc::new(FixedClock(decision_time())),
    );
    (service, ids)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
