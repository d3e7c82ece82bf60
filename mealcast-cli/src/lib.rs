//! Command-line interface for the Mealcast dining recommender.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod config;
mod error;
mod handler;
mod recommend;
mod server;

pub use error::CliError;

use config::{RecommendArgs, ServeArgs};

/// Run the Mealcast CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when arguments or configuration are invalid, when
/// an adapter cannot be built, or when the selected command fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Recommend(args) => recommend::run_recommend(args),
        Command::Serve(args) => server::run_serve(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "mealcast",
    about = "Weather-aware dining recommendations",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one recommendation pass and print the result as JSON.
    Recommend(RecommendArgs),
    /// Serve recommendations over HTTP behind a shared secret.
    Serve(ServeArgs),
}

#[cfg(test)]
mod tests;
