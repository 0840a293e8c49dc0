mod config;
mod policy;
mod rules;

pub use config::EligibilityConfig;
pub use policy::{EligibilityVerdict, IneligibilityReason, ELIGIBLE_REASON};
pub use rules::EligibilityRule;

use super::domain::LoanApplication;
use rules::RULES;
use serde::{Deserialize, Serialize};

/// Stateless evaluator applying the ordered base rules to a validated application.
#[derive(Debug, Clone)]
pub struct EligibilityEngine {
    config: EligibilityConfig,
}

impl EligibilityEngine {
    pub fn new(config: EligibilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    /// First failing rule wins; later rules are not consulted.
    pub fn evaluate(&self, application: &LoanApplication) -> EligibilityVerdict {
        RULES
            .iter()
            .find_map(|(_, check)| check(application, &self.config).err())
            .map_or(EligibilityVerdict::Eligible, EligibilityVerdict::Ineligible)
    }

    /// Runs every rule for an audit trail. The verdict matches [`Self::evaluate`].
    pub fn assess(&self, application: &LoanApplication) -> EligibilityAssessment {
        let checks: Vec<RuleCheck> = RULES
            .iter()
            .map(|(rule, check)| match check(application, &self.config) {
                Ok(notes) => RuleCheck {
                    rule: *rule,
                    passed: true,
                    notes,
                },
                Err(reason) => RuleCheck {
                    rule: *rule,
                    passed: false,
                    notes: reason.summary(),
                },
            })
            .collect();

        EligibilityAssessment {
            verdict: self.evaluate(application),
            checks,
        }
    }
}

impl Default for EligibilityEngine {
    fn default() -> Self {
        Self::new(EligibilityConfig::default())
    }
}

/// Outcome of one rule, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCheck {
    pub rule: EligibilityRule,
    pub passed: bool,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityAssessment {
    pub verdict: EligibilityVerdict,
    pub checks: Vec<RuleCheck>,
}
