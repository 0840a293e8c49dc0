//! Field validators and the two validation tiers that orchestrate them.

pub mod checks;
pub mod client;
pub mod request;

pub use checks::{
    check_age, check_amount, check_email, check_full_name, check_loan_purpose,
    check_phone_number, normalize_phone_number, AmountBounds, FieldViolation,
    LOAN_AMOUNT_BOUNDS, MONTHLY_INCOME_BOUNDS,
};
pub use client::{
    parse_age, parse_amount, validate_age, validate_email, validate_field, validate_form,
    validate_full_name, validate_loan_amount, validate_loan_purpose, validate_monthly_income,
    validate_phone_number, FieldErrors, FormValues,
};
pub use request::{validate_request, RequestValidationError};
