use serde::{Deserialize, Serialize};

use super::super::domain::LoanPurpose;

/// Policy dials for the base eligibility rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    pub minimum_monthly_income: f64,
    pub max_loan_to_income_multiple: f64,
    pub minimum_age: u32,
    pub maximum_age: u32,
    pub unsupported_purposes: Vec<LoanPurpose>,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            minimum_monthly_income: 10_000.0,
            max_loan_to_income_multiple: 10.0,
            minimum_age: 20,
            maximum_age: 60,
            unsupported_purposes: vec![LoanPurpose::Business],
        }
    }
}
