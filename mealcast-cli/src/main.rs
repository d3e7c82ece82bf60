//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use mealcast_cli::CliError;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    match mealcast_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("mealcast: {err}");
            std::process::exit(1);
        }
    }
}
