use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for decided applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Purposes an applicant may select on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanPurpose {
    Education,
    Home,
    Car,
    Business,
    Personal,
}

impl LoanPurpose {
    pub const ALL: [LoanPurpose; 5] = [
        LoanPurpose::Education,
        LoanPurpose::Home,
        LoanPurpose::Car,
        LoanPurpose::Business,
        LoanPurpose::Personal,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            LoanPurpose::Education => "education",
            LoanPurpose::Home => "home",
            LoanPurpose::Car => "car",
            LoanPurpose::Business => "business",
            LoanPurpose::Personal => "personal",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            LoanPurpose::Education => "Education",
            LoanPurpose::Home => "Home",
            LoanPurpose::Car => "Car",
            LoanPurpose::Business => "Business",
            LoanPurpose::Personal => "Personal",
        }
    }

    /// Comma separated wire names in declared order.
    pub fn listing() -> String {
        Self::ALL
            .iter()
            .map(|purpose| purpose.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for LoanPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown loan purpose '{0}'")]
pub struct UnknownLoanPurpose(pub String);

impl FromStr for LoanPurpose {
    type Err = UnknownLoanPurpose;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Self::ALL
            .into_iter()
            .find(|purpose| purpose.as_str() == trimmed)
            .ok_or_else(|| UnknownLoanPurpose(trimmed.to_string()))
    }
}

/// Application fields in their declared order. The order drives error display,
/// the missing-field list, and which violation the server reports first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    MonthlyIncome,
    LoanAmount,
    LoanPurpose,
    Age,
    PhoneNumber,
    Email,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::FullName,
        Field::MonthlyIncome,
        Field::LoanAmount,
        Field::LoanPurpose,
        Field::Age,
        Field::PhoneNumber,
        Field::Email,
    ];

    /// JSON key used on the wire.
    pub const fn wire_name(self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::MonthlyIncome => "monthlyIncome",
            Field::LoanAmount => "loanAmount",
            Field::LoanPurpose => "loanPurpose",
            Field::Age => "age",
            Field::PhoneNumber => "phoneNumber",
            Field::Email => "email",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Field::FullName => "Full name",
            Field::MonthlyIncome => "Monthly income",
            Field::LoanAmount => "Loan amount",
            Field::LoanPurpose => "Loan purpose",
            Field::Age => "Age",
            Field::PhoneNumber => "Phone number",
            Field::Email => "Email",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Raw submission as received by the transport. Every field is optional so that
/// absent keys can be reported together instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplicationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_income: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// An application that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    pub full_name: String,
    pub phone_number: String,
    pub monthly_income: f64,
    pub loan_amount: f64,
    pub loan_purpose: LoanPurpose,
    pub age: u32,
    pub email: String,
}

/// Outcome returned for every request that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDecision {
    pub application_id: ApplicationId,
    pub eligible: bool,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}
