//! ai - Azure OpenAI from the command line
//!
//! This is the main entry point for the `ai` binary: it forwards text or
//! file contents to an Azure OpenAI chat completion deployment, collecting
//! and securely storing the connection credentials on first run.

mod cli;
mod error;
mod handlers;
mod logging;
mod onboarding;
mod output;

use std::process;

use cli::Cli;
use colored::control;
use error::Result;
use logging::LoggingConfig;
use onboarding::ConsolePrompter;
use output::OutputWriter;

use ai_core::KeyringStore;

#[tokio::main]
async fn main() {
    // Parse command-line arguments; clap handles --help and usage errors.
    let cli = Cli::parse_args();

    // Set up colored output
    control::set_override(cli.use_color());

    // Initialize logging
    if let Err(e) = init_logging(&cli) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    // Run the application
    match run(cli).await {
        Ok(()) => {
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}", error::format_error(&e, control::SHOULD_COLORIZE.should_colorize()));
            if let Some(hint) = e.hint() {
                eprintln!("{}", hint);
            }
            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<()> {
    let store = KeyringStore::new();
    let mut output = OutputWriter::new(cli.use_color(), cli.quiet);

    if cli.delete_keys {
        return handlers::handle_delete_keys(&store, &mut output);
    }

    // clap enforces the positional whenever --delete-keys is absent.
    let input = cli
        .input
        .as_deref()
        .expect("clap guarantees INPUT without --delete-keys");

    handlers::handle_completion(
        &store,
        &mut ConsolePrompter,
        input,
        cli.prompt.as_deref(),
        &mut output,
    )
    .await
}

/// Initialize the logging system from CLI flags
fn init_logging(cli: &Cli) -> Result<()> {
    let mut config = LoggingConfig::from_verbosity(cli.verbosity_level());
    config.merge_with_env();

    if cli.quiet {
        config.level = "error".to_string();
    }

    logging::init_logging(config)
}
