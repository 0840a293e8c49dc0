use std::fmt;

use super::super::domain::{Field, LoanApplication, LoanApplicationRequest, LoanPurpose};
use super::checks::{
    check_age, check_amount, check_email, check_full_name, check_loan_purpose,
    check_phone_number, FieldViolation, FULL_NAME_MAX_CHARS, FULL_NAME_MIN_CHARS,
    LOAN_AMOUNT_BOUNDS, MONTHLY_INCOME_BOUNDS, PHONE_NUMBER_DIGITS,
};
use super::client::group_thousands;

/// Server-side rejection. Carries a single dominant reason for the 400 body.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestValidationError {
    #[error("missing required fields: {}", MissingList(.0))]
    MissingFields(Vec<Field>),
    #[error("{}", server_message(*.field, *.violation))]
    Constraint {
        field: Field,
        violation: FieldViolation,
    },
}

impl RequestValidationError {
    /// Field the rejection is attributed to; the first one for missing lists.
    pub fn field(&self) -> Option<Field> {
        match self {
            RequestValidationError::MissingFields(fields) => fields.first().copied(),
            RequestValidationError::Constraint { field, .. } => Some(*field),
        }
    }
}

struct MissingList<'a>(&'a [Field]);

impl fmt::Display for MissingList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, field) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(field.wire_name())?;
        }
        Ok(())
    }
}

fn server_message(field: Field, violation: FieldViolation) -> String {
    match field {
        Field::FullName => format!(
            "Full name must be between {FULL_NAME_MIN_CHARS} and {FULL_NAME_MAX_CHARS} characters"
        ),
        Field::MonthlyIncome => format!(
            "Monthly income must be between {} and {}",
            group_thousands(MONTHLY_INCOME_BOUNDS.min),
            group_thousands(MONTHLY_INCOME_BOUNDS.max)
        ),
        Field::LoanAmount => format!(
            "Loan amount must be between {} and {}",
            group_thousands(LOAN_AMOUNT_BOUNDS.min),
            group_thousands(LOAN_AMOUNT_BOUNDS.max)
        ),
        Field::LoanPurpose => format!("Loan purpose must be one of: {}", LoanPurpose::listing()),
        Field::Age => "Age must be a number more than 0".to_string(),
        Field::PhoneNumber => match violation {
            FieldViolation::NotNumeric => "Phone number must be numeric".to_string(),
            _ => format!("Phone number must be {PHONE_NUMBER_DIGITS} digits"),
        },
        Field::Email => "Email must be a valid email address".to_string(),
    }
}

fn is_missing_text(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |text| text.trim().is_empty())
}

fn missing_fields(request: &LoanApplicationRequest) -> Vec<Field> {
    Field::ALL
        .into_iter()
        .filter(|field| match field {
            Field::FullName => is_missing_text(&request.full_name),
            Field::MonthlyIncome => request.monthly_income.is_none(),
            Field::LoanAmount => request.loan_amount.is_none(),
            Field::LoanPurpose => is_missing_text(&request.loan_purpose),
            Field::Age => request.age.is_none(),
            Field::PhoneNumber => is_missing_text(&request.phone_number),
            Field::Email => is_missing_text(&request.email),
        })
        .collect()
}

fn constraint(field: Field) -> impl Fn(FieldViolation) -> RequestValidationError {
    move |violation| RequestValidationError::Constraint { field, violation }
}

/// Validates a raw submission and produces the typed application.
///
/// Absent fields are reported together. When every field is present, fields are
/// checked in declared order and the first violation is reported.
pub fn validate_request(
    request: &LoanApplicationRequest,
) -> Result<LoanApplication, RequestValidationError> {
    let missing = missing_fields(request);
    if !missing.is_empty() {
        return Err(RequestValidationError::MissingFields(missing));
    }

    let (
        Some(full_name),
        Some(monthly_income),
        Some(loan_amount),
        Some(loan_purpose),
        Some(age),
        Some(phone_number),
        Some(email),
    ) = (
        request.full_name.as_deref(),
        request.monthly_income,
        request.loan_amount,
        request.loan_purpose.as_deref(),
        request.age,
        request.phone_number.as_deref(),
        request.email.as_deref(),
    )
    else {
        return Err(RequestValidationError::MissingFields(missing_fields(
            request,
        )));
    };

    check_full_name(full_name).map_err(constraint(Field::FullName))?;
    check_amount(monthly_income, MONTHLY_INCOME_BOUNDS).map_err(constraint(Field::MonthlyIncome))?;
    check_amount(loan_amount, LOAN_AMOUNT_BOUNDS).map_err(constraint(Field::LoanAmount))?;
    let loan_purpose = check_loan_purpose(loan_purpose).map_err(constraint(Field::LoanPurpose))?;
    let age = check_age(age).map_err(constraint(Field::Age))?;
    let phone_number = check_phone_number(phone_number).map_err(constraint(Field::PhoneNumber))?;
    check_email(email).map_err(constraint(Field::Email))?;

    Ok(LoanApplication {
        full_name: full_name.trim().to_string(),
        phone_number,
        monthly_income,
        loan_amount,
        loan_purpose,
        age,
        email: email.trim().to_string(),
    })
}
