//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API. The tool
//! has a single invocation shape plus a credential-management flag, so there
//! are no subcommands.

use clap::Parser;
use is_terminal::IsTerminal;

const LONG_ABOUT: &str = "\
Send text or file contents to an Azure OpenAI deployment and print the reply.

The input argument is either a path to a text file or literal text; the same
rule applies to --prompt. When --prompt is omitted, a general-assistance
system prompt is used.

The tool stores three credentials in the system keyring: the Azure OpenAI
API key, the resource endpoint, and the deployment name. On first launch you
will be prompted to enter them (the API key is masked); afterwards they are
read from secure storage. Use --delete-keys to remove all stored
credentials.";

/// ai - Azure OpenAI from the command line
#[derive(Parser, Debug)]
#[command(
    name = "ai",
    version,
    author,
    about = "Send text or a file to an Azure OpenAI deployment and print the reply",
    long_about = LONG_ABOUT,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Input to process - either a file path or direct text
    #[arg(
        value_name = "INPUT",
        required_unless_present = "delete_keys",
        conflicts_with = "delete_keys"
    )]
    pub input: Option<String>,

    /// System prompt - either a file path or direct text (defaults to general assistance)
    #[arg(
        short,
        long,
        value_name = "PROMPT",
        conflicts_with = "delete_keys"
    )]
    pub prompt: Option<String>,

    /// Delete all stored credentials from secure storage
    #[arg(long)]
    pub delete_keys: bool,

    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stderr().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_plain_input() {
        let cli = Cli::parse_from(["ai", "Hello"]);
        assert_eq!(cli.input.as_deref(), Some("Hello"));
        assert!(cli.prompt.is_none());
        assert!(!cli.delete_keys);
    }

    #[test]
    fn test_prompt_before_input() {
        let cli = Cli::parse_from(["ai", "--prompt", "be terse", "notes.txt"]);
        assert_eq!(cli.prompt.as_deref(), Some("be terse"));
        assert_eq!(cli.input.as_deref(), Some("notes.txt"));
    }

    #[test]
    fn test_prompt_after_input() {
        let cli = Cli::parse_from(["ai", "notes.txt", "--prompt", "be terse"]);
        assert_eq!(cli.prompt.as_deref(), Some("be terse"));
        assert_eq!(cli.input.as_deref(), Some("notes.txt"));
    }

    #[test]
    fn test_delete_keys_alone() {
        let cli = Cli::parse_from(["ai", "--delete-keys"]);
        assert!(cli.delete_keys);
        assert!(cli.input.is_none());
    }

    #[test]
    fn test_delete_keys_with_input_is_rejected() {
        let err = Cli::try_parse_from(["ai", "--delete-keys", "Hello"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_delete_keys_with_prompt_is_rejected() {
        let err = Cli::try_parse_from(["ai", "--delete-keys", "--prompt", "x"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_missing_input_is_rejected() {
        let err = Cli::try_parse_from(["ai", "--quiet"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_help_wins_over_other_arguments() {
        // --help must exit 0 no matter what else is on the line.
        let err = Cli::try_parse_from(["ai", "--delete-keys", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);

        let err = Cli::try_parse_from(["ai", "-h"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_usage_errors_exit_nonzero() {
        let err = Cli::try_parse_from(["ai"]).unwrap_err();
        assert_ne!(err.exit_code(), 0);
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli::parse_from(["ai", "-vv", "Hello"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["ai", "--quiet", "Hello"]);
        assert_eq!(cli.verbosity_level(), 0);
    }
}
