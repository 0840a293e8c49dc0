//! Client-tier state for the pre-qualification form.
//!
//! The presentation layer owns a [`LoanForm`] and drives it through plain method
//! calls; validation itself stays in the pure functions of the validation module.

use serde::Deserialize;
use serde_json::Value;

use super::domain::{Field, LoanApplicationRequest, LoanDecision};
use super::validation::{
    normalize_phone_number, parse_age, parse_amount, validate_form, FieldErrors, FormValues,
};

pub const TRANSPORT_FAILURE_MESSAGE: &str = "Network error or unable to connect to server.";
const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// What the client learned from its last submission attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Decided(LoanDecision),
    /// Server answered with a declared reason (typically 400).
    Rejected { reason: String },
    /// Network failure or a response without a usable body.
    TransportFailed,
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Decided(_))
    }

    /// Text shown to the applicant.
    pub fn message(&self) -> String {
        match self {
            SubmissionOutcome::Decided(decision) => decision.reason.clone(),
            SubmissionOutcome::Rejected { reason } => reason.clone(),
            SubmissionOutcome::TransportFailed => TRANSPORT_FAILURE_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Maps an HTTP status and raw body to the outcome the form displays.
pub fn interpret_response(status: u16, body: &[u8]) -> SubmissionOutcome {
    if (200..300).contains(&status) {
        return match serde_json::from_slice::<LoanDecision>(body) {
            Ok(decision) => SubmissionOutcome::Decided(decision),
            Err(_) => SubmissionOutcome::TransportFailed,
        };
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(value @ Value::Object(_)) => {
            let envelope: ErrorEnvelope = match serde_json::from_value(value) {
                Ok(envelope) => envelope,
                Err(_) => return SubmissionOutcome::TransportFailed,
            };
            let reason = envelope
                .reason
                .filter(|reason| !reason.is_empty())
                .or(envelope.message.filter(|message| !message.is_empty()))
                .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string());
            SubmissionOutcome::Rejected { reason }
        }
        _ => SubmissionOutcome::TransportFailed,
    }
}

/// Form values, their current errors, and the last submission outcome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoanForm {
    values: FormValues,
    errors: FieldErrors,
    last_outcome: Option<SubmissionOutcome>,
}

impl LoanForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: FormValues) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn last_outcome(&self) -> Option<&SubmissionOutcome> {
        self.last_outcome.as_ref()
    }

    /// Stores an edit. Editing a field drops its error key and the stale outcome.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.values.set(field, value);
        if self.errors.contains(field) {
            self.errors = self.errors.without(field);
        }
        self.last_outcome = None;
    }

    /// Rebuilds the error map from scratch; returns whether the form is valid.
    pub fn validate(&mut self) -> bool {
        self.errors = validate_form(&self.values);
        self.errors.is_valid()
    }

    /// Pre-submit gate. `None` means the network call must not happen.
    pub fn submission(&mut self) -> Option<LoanApplicationRequest> {
        if !self.validate() {
            self.last_outcome = None;
            return None;
        }

        let values = &self.values;
        Some(LoanApplicationRequest {
            full_name: Some(values.full_name.trim().to_string()),
            phone_number: Some(normalize_phone_number(&values.phone_number)),
            monthly_income: parse_amount(&values.monthly_income),
            loan_amount: parse_amount(&values.loan_amount),
            loan_purpose: Some(values.loan_purpose.trim().to_string()),
            age: parse_age(&values.age),
            email: Some(values.email.trim().to_string()),
        })
    }

    /// Records the outcome; a decision clears the form for the next applicant.
    pub fn record_outcome(&mut self, outcome: SubmissionOutcome) {
        if outcome.is_success() {
            self.values = FormValues::default();
        }
        self.last_outcome = Some(outcome);
    }
}
