//! Loan pre-qualification: field validation, eligibility rules, and decision assembly.
//!
//! Requests flow through [`validation`] (shape checks shared by the client and server
//! tiers), then [`eligibility`] (ordered base rules), and finally the
//! [`PrequalificationService`], which stamps each decision with a fresh identifier and
//! timestamp. Nothing is retained between requests.

pub mod batch;
pub mod domain;
pub mod eligibility;
pub mod form;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use batch::{evaluate_batch, BatchFormat, BatchImportError, BatchImporter, BatchOutcome};
pub use domain::{
    ApplicationId, Field, LoanApplication, LoanApplicationRequest, LoanDecision, LoanPurpose,
    UnknownLoanPurpose,
};
pub use eligibility::{
    EligibilityAssessment, EligibilityConfig, EligibilityEngine, EligibilityRule,
    EligibilityVerdict, IneligibilityReason, RuleCheck, ELIGIBLE_REASON,
};
pub use form::{interpret_response, LoanForm, SubmissionOutcome, TRANSPORT_FAILURE_MESSAGE};
pub use router::{prequalification_router, BadRequestBody, INVALID_BODY_MESSAGE};
pub use service::{
    ApplicationIdGenerator, Clock, PrequalificationError, PrequalificationService,
    RandomApplicationIds, SystemClock,
};
pub use validation::{
    normalize_phone_number, validate_field, validate_form, validate_phone_number,
    validate_request, FieldErrors, FieldViolation, FormValues, RequestValidationError,
};
