//! First-run collection of the Azure OpenAI credentials
//!
//! Runs before every completion invocation: checks the credential store for
//! all three values and interactively collects whichever are missing. With a
//! complete set already stored the flow is a no-op, so repeat runs never
//! re-prompt. Prompts are written to stderr and the API key is masked while
//! typed.

use std::io::{self, BufRead, Write};

use ai_core::{CredentialKey, CredentialStore, Credentials};
use tracing::debug;

use crate::error::{Error, Result};

/// Console interaction needed to collect a credential value
///
/// Split out as a trait so the onboarding flow can be driven by a scripted
/// implementation in tests.
pub trait CredentialPrompter {
    /// Show a status line (stored-confirmation, not-found notice)
    fn notify(&mut self, message: &str) -> Result<()>;
    /// Request a visible value
    fn read_line(&mut self, message: &str) -> Result<String>;
    /// Request a value with input masking
    fn read_secret(&mut self, message: &str) -> Result<String>;
}

/// Prompter backed by the real terminal
pub struct ConsolePrompter;

impl CredentialPrompter for ConsolePrompter {
    fn notify(&mut self, message: &str) -> Result<()> {
        writeln!(io::stderr(), "{message}")?;
        Ok(())
    }

    fn read_line(&mut self, message: &str) -> Result<String> {
        let mut stderr = io::stderr();
        write!(stderr, "{message}")?;
        stderr.flush()?;

        let mut value = String::new();
        io::stdin().lock().read_line(&mut value)?;
        Ok(value.trim().to_string())
    }

    fn read_secret(&mut self, message: &str) -> Result<String> {
        // rpassword prints the prompt itself and masks input on a terminal.
        Ok(rpassword::prompt_password(message)?.trim().to_string())
    }
}

fn prompt_message(key: CredentialKey) -> &'static str {
    match key {
        CredentialKey::ApiKey => "Please enter your API key (input will be hidden): ",
        CredentialKey::Endpoint => {
            "Please enter your endpoint (e.g., https://your-resource.openai.azure.com): "
        }
        CredentialKey::Deployment => "Please enter your deployment name: ",
    }
}

/// Ensure all three credentials exist, prompting for any that are missing
///
/// Returns the complete set on success. Aborts with an error if the user
/// supplies an empty value or a store write fails; in that case nothing
/// further is attempted.
pub fn ensure_credentials(
    store: &dyn CredentialStore,
    prompter: &mut dyn CredentialPrompter,
) -> Result<Credentials> {
    if let Some(credentials) = Credentials::load(store)? {
        debug!("all credentials present in secure storage");
        return Ok(credentials);
    }

    for key in Credentials::missing(store)? {
        prompter.notify(&format!("{key} not found in secure storage."))?;

        let value = match key {
            CredentialKey::ApiKey => prompter.read_secret(prompt_message(key))?,
            _ => prompter.read_line(prompt_message(key))?,
        };
        if value.is_empty() {
            return Err(Error::onboarding(format!("no value provided for {key}")));
        }

        store.set(key, &value)?;
        prompter.notify(&format!("{key} securely stored for future use."))?;
    }

    Credentials::load(store)?.ok_or_else(|| {
        Error::onboarding("credentials are still incomplete after setup".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai_core::MemoryStore;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct ScriptedPrompter {
        lines: VecDeque<String>,
        secrets: VecDeque<String>,
        notices: Vec<String>,
        line_requests: usize,
        secret_requests: usize,
    }

    impl ScriptedPrompter {
        fn with_responses(secrets: &[&str], lines: &[&str]) -> Self {
            Self {
                lines: lines.iter().map(|s| s.to_string()).collect(),
                secrets: secrets.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            }
        }
    }

    impl CredentialPrompter for ScriptedPrompter {
        fn notify(&mut self, message: &str) -> Result<()> {
            self.notices.push(message.to_string());
            Ok(())
        }

        fn read_line(&mut self, _message: &str) -> Result<String> {
            self.line_requests += 1;
            Ok(self.lines.pop_front().expect("unexpected line prompt"))
        }

        fn read_secret(&mut self, _message: &str) -> Result<String> {
            self.secret_requests += 1;
            Ok(self.secrets.pop_front().expect("unexpected secret prompt"))
        }
    }

    fn populated_store() -> MemoryStore {
        let store = MemoryStore::new();
        store.set(CredentialKey::ApiKey, "sk-test").unwrap();
        store
            .set(CredentialKey::Endpoint, "https://example.openai.azure.com")
            .unwrap();
        store.set(CredentialKey::Deployment, "gpt-4o").unwrap();
        store
    }

    #[test]
    fn test_complete_store_never_prompts() {
        let store = populated_store();
        let mut prompter = ScriptedPrompter::default();

        let credentials = ensure_credentials(&store, &mut prompter).unwrap();
        assert_eq!(credentials.api_key, "sk-test");
        assert_eq!(prompter.line_requests, 0);
        assert_eq!(prompter.secret_requests, 0);
        assert!(prompter.notices.is_empty());
    }

    #[test]
    fn test_repeat_runs_are_idempotent() {
        let store = populated_store();

        for _ in 0..2 {
            let mut prompter = ScriptedPrompter::default();
            ensure_credentials(&store, &mut prompter).unwrap();
            assert_eq!(prompter.line_requests + prompter.secret_requests, 0);
        }
    }

    #[test]
    fn test_first_run_collects_and_stores_everything() {
        let store = MemoryStore::new();
        let mut prompter = ScriptedPrompter::with_responses(
            &["sk-new"],
            &["https://example.openai.azure.com", "gpt-4o"],
        );

        let credentials = ensure_credentials(&store, &mut prompter).unwrap();
        assert_eq!(credentials.api_key, "sk-new");
        assert_eq!(credentials.endpoint, "https://example.openai.azure.com");
        assert_eq!(credentials.deployment, "gpt-4o");

        // The API key must come through the masked path.
        assert_eq!(prompter.secret_requests, 1);
        assert_eq!(prompter.line_requests, 2);

        assert_eq!(
            store.get(CredentialKey::ApiKey).unwrap().as_deref(),
            Some("sk-new")
        );
    }

    #[test]
    fn test_only_missing_credentials_are_requested() {
        let store = populated_store();
        store.delete(CredentialKey::Deployment).unwrap();

        let mut prompter = ScriptedPrompter::with_responses(&[], &["gpt-35-turbo"]);
        let credentials = ensure_credentials(&store, &mut prompter).unwrap();

        assert_eq!(credentials.deployment, "gpt-35-turbo");
        assert_eq!(prompter.secret_requests, 0);
        assert_eq!(prompter.line_requests, 1);
    }

    #[test]
    fn test_empty_value_aborts() {
        let store = MemoryStore::new();
        let mut prompter = ScriptedPrompter::with_responses(&[""], &[]);

        let result = ensure_credentials(&store, &mut prompter);
        assert!(matches!(result, Err(Error::Onboarding { .. })));

        // Nothing gets stored from an aborted run.
        assert!(store.get(CredentialKey::ApiKey).unwrap().is_none());
    }
}
