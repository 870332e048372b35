//! HTTP surface and command-line entry point.

mod cli;
mod routes;
mod server;
mod state;

pub use routes::router;
pub use state::AppState;

use crate::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
