use serde::{Deserialize, Serialize};

use super::super::domain::LoanApplication;
use super::config::EligibilityConfig;
use super::policy::IneligibilityReason;

/// Base rules in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityRule {
    IncomeSufficiency,
    AgeBand,
    PurposeRestriction,
}

impl EligibilityRule {
    pub const fn as_str(self) -> &'static str {
        match self {
            EligibilityRule::IncomeSufficiency => "income_sufficiency",
            EligibilityRule::AgeBand => "age_band",
            EligibilityRule::PurposeRestriction => "purpose_restriction",
        }
    }
}

type RuleCheckFn = fn(&LoanApplication, &EligibilityConfig) -> Result<String, IneligibilityReason>;

/// Evaluation order. Only the first failure is surfaced, so reordering changes outcomes.
pub(crate) const RULES: [(EligibilityRule, RuleCheckFn); 3] = [
    (EligibilityRule::IncomeSufficiency, income_sufficiency),
    (EligibilityRule::AgeBand, age_band),
    (EligibilityRule::PurposeRestriction, purpose_restriction),
];

fn income_sufficiency(
    application: &LoanApplication,
    config: &EligibilityConfig,
) -> Result<String, IneligibilityReason> {
    let income = application.monthly_income;
    let ceiling = income * config.max_loan_to_income_multiple;

    if income < config.minimum_monthly_income || application.loan_amount > ceiling {
        return Err(IneligibilityReason::InsufficientIncome);
    }

    Ok(format!(
        "income {income:.0} clears floor {:.0}; loan {:.0} within {:.0}x income",
        config.minimum_monthly_income, application.loan_amount, config.max_loan_to_income_multiple
    ))
}

fn age_band(
    application: &LoanApplication,
    config: &EligibilityConfig,
) -> Result<String, IneligibilityReason> {
    if (config.minimum_age..=config.maximum_age).contains(&application.age) {
        Ok(format!(
            "age {} within {}-{}",
            application.age, config.minimum_age, config.maximum_age
        ))
    } else {
        Err(IneligibilityReason::AgeOutOfRange {
            minimum: config.minimum_age,
            maximum: config.maximum_age,
        })
    }
}

fn purpose_restriction(
    application: &LoanApplication,
    config: &EligibilityConfig,
) -> Result<String, IneligibilityReason> {
    if config
        .unsupported_purposes
        .contains(&application.loan_purpose)
    {
        return Err(IneligibilityReason::UnsupportedPurpose(
            application.loan_purpose,
        ));
    }
    Ok(format!("{} loans supported", application.loan_purpose))
}
