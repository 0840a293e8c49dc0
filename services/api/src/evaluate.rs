use clap::{Args, ValueEnum};
use loan_prequal::config::AppConfig;
use loan_prequal::error::AppError;
use loan_prequal::workflows::prequalification::{
    evaluate_batch, validate_request, ApplicationIdGenerator, BatchFormat, BatchImporter,
    BatchOutcome, Clock, LoanApplicationRequest, PrequalificationService,
};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for BatchFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => BatchFormat::Csv,
            FormatArg::Json => BatchFormat::Json,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// CSV or JSON file of applications
    pub(crate) file: PathBuf,
    /// Input format; guessed from the file extension when omitted
    #[arg(long, value_enum)]
    pub(crate) format: Option<FormatArg>,
    /// Print every eligibility rule check under each decided row
    #[arg(long)]
    pub(crate) explain: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let requests = BatchImporter::from_path(&args.file, args.format.map(BatchFormat::from))?;
    let service = PrequalificationService::new(config.eligibility);

    let outcomes = evaluate_batch(&service, &requests);
    println!(
        "Evaluated {} application(s) from {}",
        outcomes.len(),
        args.file.display()
    );
    for (row, (request, outcome)) in requests.iter().zip(&outcomes).enumerate() {
        println!("  {:>4}. {}", row + 1, outcome.summary());
        if args.explain {
            for line in rule_check_lines(&service, request) {
                println!("        {line}");
            }
        }
    }

    let tally = Tally::from_outcomes(&outcomes);
    println!(
        "\nEligible: {}  Ineligible: {}  Rejected: {}",
        tally.eligible, tally.ineligible, tally.rejected
    );
    Ok(())
}

/// Audit trail for one row; empty when the row fails validation.
fn rule_check_lines<G, C>(
    service: &PrequalificationService<G, C>,
    request: &LoanApplicationRequest,
) -> Vec<String>
where
    G: ApplicationIdGenerator + 'static,
    C: Clock + 'static,
{
    let Ok(application) = validate_request(request) else {
        return Vec::new();
    };

    service
        .engine()
        .assess(&application)
        .checks
        .into_iter()
        .map(|check| {
            let status = if check.passed { "pass" } else { "fail" };
            format!("{status} {}: {}", check.rule.as_str(), check.notes)
        })
        .collect()
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Tally {
    eligible: usize,
    ineligible: usize,
    rejected: usize,
}

impl Tally {
    fn from_outcomes(outcomes: &[BatchOutcome]) -> Self {
        outcomes.iter().fold(Self::default(), |mut tally, outcome| {
            match outcome {
                BatchOutcome::Decided(decision) if decision.eligible => tally.eligible += 1,
                BatchOutcome::Decided(_) => tally.ineligible += 1,
                BatchOutcome::Rejected { .. } => tally.rejected += 1,
            }
            tally
        })
    }
}
