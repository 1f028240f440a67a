//! Error types and handling for the CLI
//!
//! Wraps the core error taxonomy, maps every failure to a stable process
//! exit code, and formats user-facing messages. Exit code 0 is reserved for
//! success (including `--help`); clap owns usage errors (exit code 2).

use std::io;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (console interaction, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from the ai-core library
    #[error("{0}")]
    Core(#[from] ai_core::Error),

    /// Credential onboarding was aborted before all values were stored
    #[error("Credential setup aborted: {message}")]
    Onboarding { message: String },

    /// One or more credentials could not be deleted
    #[error("Failed to delete {} credential(s) from secure storage", .failed.len())]
    DeleteFailed { failed: Vec<String> },
}

impl Error {
    /// Create an onboarding error
    pub fn onboarding(message: impl Into<String>) -> Self {
        Self::Onboarding {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Core(core) => match core {
                ai_core::Error::StoreUnavailable { .. } => 3,
                ai_core::Error::Authentication { .. } => 4,
                ai_core::Error::Network { .. } => 5,
                ai_core::Error::Service { .. } => 6,
                ai_core::Error::InputTooLarge { .. } => 7,
                ai_core::Error::Configuration { .. } => 8,
                ai_core::Error::Json { .. } => 9,
                ai_core::Error::Io { .. } => 1,
            },
            Self::Onboarding { .. } => 10,
            Self::DeleteFailed { .. } => 11,
        }
    }

    /// A follow-up suggestion printed after the error message, if any
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Core(ai_core::Error::Authentication { .. }) => Some(
                "If the API key has expired, run `ai --delete-keys` and invoke the tool again to enter new credentials.",
            ),
            Self::Core(ai_core::Error::StoreUnavailable { .. }) => Some(
                "The OS credential store could not be reached; check that a keyring service is available in this environment.",
            ),
            _ => None,
        }
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}
