use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use super::domain::{ApplicationId, LoanApplication, LoanApplicationRequest, LoanDecision};
use super::eligibility::{EligibilityConfig, EligibilityEngine, EligibilityVerdict};
use super::validation::{validate_request, RequestValidationError};

/// Source of fresh application identifiers. Implementations must be safe to call
/// from many request handlers at once and must never repeat an identifier.
pub trait ApplicationIdGenerator: Send + Sync {
    fn next_id(&self) -> ApplicationId;
}

/// Random 128-bit (UUID v4) identifiers; no coordination between instances needed.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomApplicationIds;

impl ApplicationIdGenerator for RandomApplicationIds {
    fn next_id(&self) -> ApplicationId {
        ApplicationId(Uuid::new_v4().to_string())
    }
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Service composing request validation, the eligibility engine, and decision assembly.
pub struct PrequalificationService<G = RandomApplicationIds, C = SystemClock> {
    engine: Arc<EligibilityEngine>,
    ids: Arc<G>,
    clock: Arc<C>,
}

impl PrequalificationService {
    pub fn new(config: EligibilityConfig) -> Self {
        Self::with_parts(config, Arc::new(RandomApplicationIds), Arc::new(SystemClock))
    }
}

impl<G, C> PrequalificationService<G, C>
where
    G: ApplicationIdGenerator + 'static,
    C: Clock + 'static,
{
    pub fn with_parts(config: EligibilityConfig, ids: Arc<G>, clock: Arc<C>) -> Self {
        Self {
            engine: Arc::new(EligibilityEngine::new(config)),
            ids,
            clock,
        }
    }

    pub fn engine(&self) -> &EligibilityEngine {
        &self.engine
    }

    /// Validate a raw submission and decide it. Rejected submissions never consume an id.
    pub fn submit(
        &self,
        request: &LoanApplicationRequest,
    ) -> Result<LoanDecision, PrequalificationError> {
        let application = validate_request(request).inspect_err(|error| {
            debug!(reason = %error, field = ?error.field(), "submission rejected");
        })?;
        Ok(self.decide(&application))
    }

    /// Decide an application that already passed validation.
    pub fn decide(&self, application: &LoanApplication) -> LoanDecision {
        let assessment = self.engine.assess(application);
        for check in &assessment.checks {
            debug!(
                rule = check.rule.as_str(),
                passed = check.passed,
                notes = %check.notes,
                "eligibility rule checked"
            );
        }
        let verdict = assessment.verdict;
        let timestamp = self.clock.now();
        let application_id = self.ids.next_id();

        info!(
            %application_id,
            eligible = verdict.is_eligible(),
            purpose = %application.loan_purpose,
            "pre-qualification decided"
        );

        decision_from(application_id, &verdict, timestamp)
    }
}

fn decision_from(
    application_id: ApplicationId,
    verdict: &EligibilityVerdict,
    timestamp: DateTime<Utc>,
) -> LoanDecision {
    LoanDecision {
        application_id,
        eligible: verdict.is_eligible(),
        reason: verdict.reason(),
        timestamp,
    }
}

/// Error raised by the pre-qualification service.
#[derive(Debug, thiserror::Error)]
pub enum PrequalificationError {
    #[error(transparent)]
    Validation(#[from] RequestValidationError),
}
