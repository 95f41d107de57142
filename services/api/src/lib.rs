mod cli;
mod infra;
mod routes;
mod score;
mod server;

use sugoi::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
