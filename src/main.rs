//! Transcript extractor - command-line tool for saving YouTube captions to text or JSON files.

use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use transcript_extractor::app;
use transcript_extractor::cli::Args;
use transcript_extractor::error::ExtractError;
use transcript_extractor::youtube::YouTubeClient;

fn main() -> ExitCode {
    // Parse command-line arguments
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // Clap handles printing error messages and help text
            e.exit();
        }
    };

    init_logging(args.verbose);

    let config = args.into_config();
    let result = YouTubeClient::new().and_then(|client| {
        let stdin = io::stdin();
        app::run(&config, &client, &mut stdin.lock(), &mut io::stdout())
    });

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

fn report(error: &ExtractError) -> ExitCode {
    tracing::debug!(?error, "run failed");
    let _ = error.report(&mut io::stderr());
    error.exit_code()
}

fn init_logging(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("transcript_extractor={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
