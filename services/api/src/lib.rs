mod cli;
mod client;
mod evaluate;
mod infra;
mod routes;
mod server;

use loan_prequal::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
