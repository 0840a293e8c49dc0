use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::domain::Field;
use super::checks::{
    check_age, check_amount, check_email, check_full_name, check_loan_purpose,
    check_phone_number, AmountBounds, FieldViolation, LOAN_AMOUNT_BOUNDS, MONTHLY_INCOME_BOUNDS,
};

/// Raw text exactly as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValues {
    pub full_name: String,
    pub phone_number: String,
    pub monthly_income: String,
    pub loan_amount: String,
    pub loan_purpose: String,
    pub age: String,
    pub email: String,
}

impl FormValues {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::MonthlyIncome => &self.monthly_income,
            Field::LoanAmount => &self.loan_amount,
            Field::LoanPurpose => &self.loan_purpose,
            Field::Age => &self.age,
            Field::PhoneNumber => &self.phone_number,
            Field::Email => &self.email,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::FullName => &mut self.full_name,
            Field::MonthlyIncome => &mut self.monthly_income,
            Field::LoanAmount => &mut self.loan_amount,
            Field::LoanPurpose => &mut self.loan_purpose,
            Field::Age => &mut self.age,
            Field::PhoneNumber => &mut self.phone_number,
            Field::Email => &mut self.email,
        };
        *slot = value.into();
    }
}

/// Per-field messages for the fields that currently fail. A key is present only
/// while its field is invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Failing fields in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Copy of the map without `field`.
    pub fn without(&self, field: Field) -> Self {
        let mut entries = self.0.clone();
        entries.remove(&field);
        Self(entries)
    }
}

impl FromIterator<(Field, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (Field, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn client_message(field: Field, violation: FieldViolation) -> String {
    let label = field.label();
    match violation {
        FieldViolation::Required => format!("{label} is required"),
        FieldViolation::TooShort { min } => {
            format!("{label} must be at least {min} characters")
        }
        FieldViolation::TooLong { max } => {
            format!("{label} must not exceed {max} characters")
        }
        FieldViolation::InvalidNumber => match field {
            Field::MonthlyIncome => "Please enter a valid income amount".to_string(),
            _ => format!("Please enter a valid {}", label.to_lowercase()),
        },
        FieldViolation::BelowMinimum { min } => {
            format!("{label} must be at least {}", group_thousands(min))
        }
        FieldViolation::AboveMaximum { max } => {
            format!("{label} must not exceed {}", group_thousands(max))
        }
        FieldViolation::InvalidSelection => "Please select a valid loan purpose".to_string(),
        FieldViolation::NotPositiveInteger => format!("{label} must be a number greater than 0"),
        FieldViolation::NotNumeric | FieldViolation::WrongLength { .. } => {
            "Phone number must be exactly 10 digits and contain only numbers 0-9".to_string()
        }
        FieldViolation::InvalidFormat => "Please enter a valid email address".to_string(),
    }
}

/// Formats a whole amount as `5,000,000`.
pub(crate) fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if value < 0.0 {
        grouped.insert(0, '-');
    }
    grouped
}

/// Parses currency text, tolerating surrounding whitespace and `,` thousands separators.
/// Separators must sit between well-formed groups: `50,000` parses, `5,0000` does not.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (trimmed, None),
    };

    if whole.contains(',') && !has_thousands_grouping(whole) {
        return None;
    }

    let mut cleaned: String = whole.chars().filter(|c| *c != ',').collect();
    if let Some(fraction) = fraction {
        cleaned.push('.');
        cleaned.push_str(fraction);
    }
    cleaned.parse::<f64>().ok()
}

fn has_thousands_grouping(whole: &str) -> bool {
    let digits = whole.strip_prefix('-').unwrap_or(whole);
    let mut groups = digits.split(',');
    let leading_ok = groups
        .next()
        .is_some_and(|group| (1..=3).contains(&group.len()) && is_all_digits(group));
    leading_ok && groups.all(|group| group.len() == 3 && is_all_digits(group))
}

fn is_all_digits(group: &str) -> bool {
    group.chars().all(|c| c.is_ascii_digit())
}

pub fn parse_age(raw: &str) -> Option<f64> {
    raw.trim().parse::<u64>().ok().map(|age| age as f64)
}

fn into_message(field: Field, result: Result<(), FieldViolation>) -> Option<String> {
    result.err().map(|violation| client_message(field, violation))
}

pub fn validate_full_name(raw: &str) -> Option<String> {
    into_message(Field::FullName, check_full_name(raw))
}

fn validate_amount(field: Field, raw: &str, bounds: AmountBounds) -> Option<String> {
    let result = if raw.trim().is_empty() {
        Err(FieldViolation::Required)
    } else {
        match parse_amount(raw) {
            Some(value) => check_amount(value, bounds),
            None => Err(FieldViolation::InvalidNumber),
        }
    };
    into_message(field, result)
}

pub fn validate_monthly_income(raw: &str) -> Option<String> {
    validate_amount(Field::MonthlyIncome, raw, MONTHLY_INCOME_BOUNDS)
}

pub fn validate_loan_amount(raw: &str) -> Option<String> {
    validate_amount(Field::LoanAmount, raw, LOAN_AMOUNT_BOUNDS)
}

pub fn validate_loan_purpose(raw: &str) -> Option<String> {
    into_message(Field::LoanPurpose, check_loan_purpose(raw).map(|_| ()))
}

pub fn validate_age(raw: &str) -> Option<String> {
    let result = if raw.trim().is_empty() {
        Err(FieldViolation::Required)
    } else {
        parse_age(raw)
            .ok_or(FieldViolation::NotPositiveInteger)
            .and_then(check_age)
            .map(|_| ())
    };
    into_message(Field::Age, result)
}

pub fn validate_phone_number(raw: &str) -> Option<String> {
    into_message(Field::PhoneNumber, check_phone_number(raw).map(|_| ()))
}

pub fn validate_email(raw: &str) -> Option<String> {
    into_message(Field::Email, check_email(raw))
}

pub fn validate_field(field: Field, raw: &str) -> Option<String> {
    match field {
        Field::FullName => validate_full_name(raw),
        Field::MonthlyIncome => validate_monthly_income(raw),
        Field::LoanAmount => validate_loan_amount(raw),
        Field::LoanPurpose => validate_loan_purpose(raw),
        Field::Age => validate_age(raw),
        Field::PhoneNumber => validate_phone_number(raw),
        Field::Email => validate_email(raw),
    }
}

/// Runs every field validator and keeps only the failures.
pub fn validate_form(values: &FormValues) -> FieldErrors {
    Field::ALL
        .into_iter()
        .filter_map(|field| {
            validate_field(field, values.get(field)).map(|message| (field, message))
        })
        .collect()
}
