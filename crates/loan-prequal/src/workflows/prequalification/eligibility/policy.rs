use serde::{Deserialize, Serialize};

use super::super::domain::LoanPurpose;

pub const ELIGIBLE_REASON: &str = "Eligible under base rules";

/// Result of running the ordered rule table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EligibilityVerdict {
    Eligible,
    Ineligible(IneligibilityReason),
}

impl EligibilityVerdict {
    pub fn is_eligible(&self) -> bool {
        matches!(self, EligibilityVerdict::Eligible)
    }

    /// Human readable reason; always populated.
    pub fn reason(&self) -> String {
        match self {
            EligibilityVerdict::Eligible => ELIGIBLE_REASON.to_string(),
            EligibilityVerdict::Ineligible(reason) => reason.summary(),
        }
    }
}

/// Disqualifying causes, one per base rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IneligibilityReason {
    InsufficientIncome,
    AgeOutOfRange { minimum: u32, maximum: u32 },
    UnsupportedPurpose(LoanPurpose),
}

impl IneligibilityReason {
    pub fn summary(&self) -> String {
        match self {
            IneligibilityReason::InsufficientIncome => "Monthly income is insufficient".to_string(),
            IneligibilityReason::AgeOutOfRange { minimum, maximum } => {
                format!("Age not in range (must be between {minimum}-{maximum})")
            }
            IneligibilityReason::UnsupportedPurpose(purpose) => {
                format!("{} loans not supported", purpose.label())
            }
        }
    }
}
