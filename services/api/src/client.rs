use clap::Args;
use loan_prequal::error::AppError;
use loan_prequal::workflows::prequalification::{
    interpret_response, Field, LoanApplicationRequest, LoanForm, SubmissionOutcome,
};
use std::time::Duration;
use tracing::debug;

const SUBMIT_PATH: &str = "/api/v1/loans";

/// Outbound client for a running pre-qualification service.
pub(crate) struct LoanClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl LoanClient {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        }
    }

    /// Never fails: transport problems surface as [`SubmissionOutcome::TransportFailed`].
    pub(crate) async fn submit(&self, payload: &LoanApplicationRequest) -> SubmissionOutcome {
        let url = format!("{}{}", self.base_url, SUBMIT_PATH);
        let response = match self.http_client.post(&url).json(payload).send().await {
            Ok(response) => response,
            Err(err) => {
                debug!(%url, error = %err, "submission did not reach the service");
                return SubmissionOutcome::TransportFailed;
            }
        };

        let status = response.status().as_u16();
        match response.bytes().await {
            Ok(body) => interpret_response(status, &body),
            Err(err) => {
                debug!(%url, status, error = %err, "failed to read response body");
                SubmissionOutcome::TransportFailed
            }
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ApplyArgs {
    /// Base URL of the running service
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    pub(crate) base_url: String,
    #[arg(long, default_value = "")]
    pub(crate) full_name: String,
    #[arg(long, default_value = "")]
    pub(crate) phone_number: String,
    /// Monthly income; thousands separators are allowed
    #[arg(long, default_value = "")]
    pub(crate) monthly_income: String,
    /// Requested loan amount; thousands separators are allowed
    #[arg(long, default_value = "")]
    pub(crate) loan_amount: String,
    /// One of education, home, car, business, personal
    #[arg(long, default_value = "")]
    pub(crate) loan_purpose: String,
    #[arg(long, default_value = "")]
    pub(crate) age: String,
    #[arg(long, default_value = "")]
    pub(crate) email: String,
}

impl ApplyArgs {
    fn into_form(self) -> (String, LoanForm) {
        let mut form = LoanForm::new();
        for (field, value) in [
            (Field::FullName, self.full_name),
            (Field::MonthlyIncome, self.monthly_income),
            (Field::LoanAmount, self.loan_amount),
            (Field::LoanPurpose, self.loan_purpose),
            (Field::Age, self.age),
            (Field::PhoneNumber, self.phone_number),
            (Field::Email, self.email),
        ] {
            form.set_field(field, value);
        }
        (self.base_url, form)
    }
}

pub(crate) async fn run_apply(args: ApplyArgs) -> Result<(), AppError> {
    let (base_url, mut form) = args.into_form();

    let Some(payload) = form.submission() else {
        println!("Application not submitted; fix the following fields:");
        for (field, message) in form.errors().iter() {
            println!("  {}: {}", field.wire_name(), message);
        }
        return Ok(());
    };

    let outcome = LoanClient::new(base_url).submit(&payload).await;
    match &outcome {
        SubmissionOutcome::Decided(decision) => {
            let verdict = if decision.eligible {
                "Eligible"
            } else {
                "Not eligible"
            };
            println!("{verdict}: {}", decision.reason);
            println!("  Application ID: {}", decision.application_id);
            println!("  Decided at: {}", decision.timestamp.to_rfc3339());
        }
        SubmissionOutcome::Rejected { reason } => println!("Rejected: {reason}"),
        SubmissionOutcome::TransportFailed => println!("{}", outcome.message()),
    }
    form.record_outcome(outcome);
    Ok(())
}
