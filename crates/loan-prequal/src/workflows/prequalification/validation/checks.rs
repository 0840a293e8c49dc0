//! Shape checks shared by the client and server validation tiers.
//!
//! Both tiers funnel through these functions so they agree on every pass/fail
//! boundary; only the wording of the resulting messages differs per tier.

use std::sync::OnceLock;

use regex::Regex;

use super::super::domain::LoanPurpose;

pub const FULL_NAME_MIN_CHARS: usize = 2;
pub const FULL_NAME_MAX_CHARS: usize = 255;
pub const PHONE_NUMBER_DIGITS: usize = 10;

pub const MONTHLY_INCOME_BOUNDS: AmountBounds = AmountBounds {
    min: 5_000.0,
    max: 5_000_000.0,
};

pub const LOAN_AMOUNT_BOUNDS: AmountBounds = AmountBounds {
    min: 1_000.0,
    max: 5_000_000.0,
};

/// Inclusive range accepted for a currency amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmountBounds {
    pub min: f64,
    pub max: f64,
}

/// Specific reason a single field failed its shape check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldViolation {
    Required,
    TooShort { min: usize },
    TooLong { max: usize },
    InvalidNumber,
    BelowMinimum { min: f64 },
    AboveMaximum { max: f64 },
    InvalidSelection,
    NotPositiveInteger,
    NotNumeric,
    WrongLength { expected: usize },
    InvalidFormat,
}

pub fn check_full_name(raw: &str) -> Result<(), FieldViolation> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldViolation::Required);
    }

    let length = trimmed.chars().count();
    if length < FULL_NAME_MIN_CHARS {
        return Err(FieldViolation::TooShort {
            min: FULL_NAME_MIN_CHARS,
        });
    }
    if length > FULL_NAME_MAX_CHARS {
        return Err(FieldViolation::TooLong {
            max: FULL_NAME_MAX_CHARS,
        });
    }
    Ok(())
}

pub fn check_amount(value: f64, bounds: AmountBounds) -> Result<(), FieldViolation> {
    if !value.is_finite() || value <= 0.0 {
        return Err(FieldViolation::InvalidNumber);
    }
    if value < bounds.min {
        return Err(FieldViolation::BelowMinimum { min: bounds.min });
    }
    if value > bounds.max {
        return Err(FieldViolation::AboveMaximum { max: bounds.max });
    }
    Ok(())
}

pub fn check_loan_purpose(raw: &str) -> Result<LoanPurpose, FieldViolation> {
    if raw.trim().is_empty() {
        return Err(FieldViolation::Required);
    }
    raw.parse::<LoanPurpose>()
        .map_err(|_| FieldViolation::InvalidSelection)
}

/// Shape only. The eligibility band lives in the rule engine.
pub fn check_age(value: f64) -> Result<u32, FieldViolation> {
    if !value.is_finite() || value.fract() != 0.0 || value < 1.0 || value > f64::from(u32::MAX) {
        return Err(FieldViolation::NotPositiveInteger);
    }
    Ok(value as u32)
}

/// Characters a typed number may carry around its digits: whitespace, `-`, `(`, `)` and `.`.
/// Anything else (`/`, `+`, letters) makes the number non-numeric rather than being stripped.
fn is_phone_formatting(character: char) -> bool {
    character.is_whitespace() || matches!(character, '-' | '(' | ')' | '.')
}

/// Canonical digits-only form of a phone number. Idempotent.
pub fn normalize_phone_number(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

pub fn check_phone_number(raw: &str) -> Result<String, FieldViolation> {
    if raw.trim().is_empty() {
        return Err(FieldViolation::Required);
    }

    if raw
        .chars()
        .any(|character| !character.is_ascii_digit() && !is_phone_formatting(character))
    {
        return Err(FieldViolation::NotNumeric);
    }

    let digits = normalize_phone_number(raw);
    if digits.len() != PHONE_NUMBER_DIGITS {
        return Err(FieldViolation::WrongLength {
            expected: PHONE_NUMBER_DIGITS,
        });
    }
    Ok(digits)
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
    })
}

pub fn check_email(raw: &str) -> Result<(), FieldViolation> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldViolation::Required);
    }
    if !email_pattern().is_match(trimmed) {
        return Err(FieldViolation::InvalidFormat);
    }
    Ok(())
}
