//! Command handlers for the CLI
//!
//! One handler per surface: the normal completion invocation and the
//! credential wipe. Handlers take the credential store as a trait object so
//! tests can run them against the in-memory backend.

use ai_core::{delete_all, resolve_input, resolve_prompt, CompletionClient, CredentialStore};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::onboarding::{self, CredentialPrompter};
use crate::output::OutputWriter;

/// Handle the normal invocation: onboard, resolve, complete, print
pub async fn handle_completion(
    store: &dyn CredentialStore,
    prompter: &mut dyn CredentialPrompter,
    input: &str,
    prompt: Option<&str>,
    output: &mut OutputWriter,
) -> Result<()> {
    let credentials = onboarding::ensure_credentials(store, prompter)?;
    debug!(?credentials, "credentials ready");

    let system_prompt = resolve_prompt(prompt)?;
    let user_input = resolve_input(input)?;
    info!(
        prompt_bytes = system_prompt.len(),
        input_bytes = user_input.len(),
        "resolved prompt and input"
    );

    let client = CompletionClient::new(&credentials)?;

    let spinner = output.spinner("Waiting for completion...");
    let result = client.complete(&system_prompt, &user_input).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    output.writeln(&result?)?;
    Ok(())
}

/// Handle `--delete-keys`: remove every credential, reporting per name
///
/// Deleting an entry that was never stored counts as success, so the command
/// is idempotent. Overall success requires every entry to be gone.
pub fn handle_delete_keys(
    store: &dyn CredentialStore,
    output: &mut OutputWriter,
) -> Result<()> {
    let mut failed = Vec::new();

    for report in delete_all(store) {
        let label = report.key.label();
        match report.outcome {
            Ok(true) => output.info(&format!("{label} deleted from secure storage."))?,
            Ok(false) => output.info(&format!("No {label} was stored."))?,
            Err(e) => {
                output.error(&format!("Could not delete {label}: {e}"))?;
                failed.push(label.to_string());
            }
        }
    }

    if failed.is_empty() {
        output.success("All credentials deleted from secure storage.")?;
        Ok(())
    } else {
        Err(Error::DeleteFailed { failed })
    }
}
