//! Studio CLI - local console for agent programs

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use studio_cli::cli::Cli;
use studio_cli::output::json;

/// Env var holding the tracing filter directive.
const LOG_ENV: &str = "STUDIO_LOG";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let json = cli.wants_json();
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            if json {
                let message = format!("{e:#}");
                match json::format_error(&message, json::error_code(&e)) {
                    Ok(obj) => println!("{obj}"),
                    Err(_) => eprintln!("Error: {message}"),
                }
            } else {
                eprintln!("Error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
