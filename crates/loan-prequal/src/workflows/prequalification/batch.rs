//! Offline evaluation of many submissions, fed from CSV or JSON exports.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{Field, LoanApplicationRequest, LoanDecision};
use super::service::{ApplicationIdGenerator, Clock, PrequalificationError, PrequalificationService};

#[derive(Debug)]
pub enum BatchImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    InvalidNumber { row: usize, field: Field },
}

impl std::fmt::Display for BatchImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchImportError::Io(err) => write!(f, "failed to read batch file: {}", err),
            BatchImportError::Csv(err) => write!(f, "invalid batch CSV data: {}", err),
            BatchImportError::Json(err) => write!(f, "invalid batch JSON data: {}", err),
            BatchImportError::InvalidNumber { row, field } => {
                write!(f, "row {row}: {field} is not a number")
            }
        }
    }
}

impl std::error::Error for BatchImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchImportError::Io(err) => Some(err),
            BatchImportError::Csv(err) => Some(err),
            BatchImportError::Json(err) => Some(err),
            BatchImportError::InvalidNumber { .. } => None,
        }
    }
}

impl From<std::io::Error> for BatchImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for BatchImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for BatchImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Supported batch encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchFormat {
    Csv,
    Json,
}

impl BatchFormat {
    /// Guesses from the file extension, defaulting to CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    full_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    phone_number: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    monthly_income: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    loan_amount: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    loan_purpose: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    age: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    email: Option<String>,
}

impl CsvRow {
    fn into_request(self, row: usize) -> Result<LoanApplicationRequest, BatchImportError> {
        let number = |raw: Option<String>, field: Field| -> Result<Option<f64>, BatchImportError> {
            raw.map(|value| {
                value
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| BatchImportError::InvalidNumber { row, field })
            })
            .transpose()
        };

        Ok(LoanApplicationRequest {
            monthly_income: number(self.monthly_income, Field::MonthlyIncome)?,
            loan_amount: number(self.loan_amount, Field::LoanAmount)?,
            age: number(self.age, Field::Age)?,
            full_name: self.full_name,
            phone_number: self.phone_number,
            loan_purpose: self.loan_purpose,
            email: self.email,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Reads submissions from batch exports.
pub struct BatchImporter;

impl BatchImporter {
    pub fn from_path(
        path: impl AsRef<Path>,
        format: Option<BatchFormat>,
    ) -> Result<Vec<LoanApplicationRequest>, BatchImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        match format.unwrap_or_else(|| BatchFormat::from_path(path)) {
            BatchFormat::Csv => Self::from_csv_reader(file),
            BatchFormat::Json => Self::from_json_reader(file),
        }
    }

    /// CSV with camelCase headers matching the JSON keys. Rows are numbered from 1.
    pub fn from_csv_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<LoanApplicationRequest>, BatchImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        csv_reader
            .deserialize::<CsvRow>()
            .enumerate()
            .map(|(index, row)| row?.into_request(index + 1))
            .collect()
    }

    /// JSON array of submission objects.
    pub fn from_json_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<LoanApplicationRequest>, BatchImportError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Per-row result of a batch run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    Decided(LoanDecision),
    Rejected { reason: String },
}

impl BatchOutcome {
    pub fn summary(&self) -> String {
        match self {
            BatchOutcome::Decided(decision) => format!(
                "{} {} ({})",
                if decision.eligible {
                    "eligible"
                } else {
                    "ineligible"
                },
                decision.application_id,
                decision.reason
            ),
            BatchOutcome::Rejected { reason } => format!("rejected: {reason}"),
        }
    }
}

pub fn evaluate_batch<G, C>(
    service: &PrequalificationService<G, C>,
    requests: &[LoanApplicationRequest],
) -> Vec<BatchOutcome>
where
    G: ApplicationIdGenerator + 'static,
    C: Clock + 'static,
{
    requests
        .iter()
        .map(|request| match service.submit(request) {
            Ok(decision) => BatchOutcome::Decided(decision),
            Err(PrequalificationError::Validation(error)) => BatchOutcome::Rejected {
                reason: error.to_string(),
            },
        })
        .collect()
}
