//! Secure storage for the Azure OpenAI connection credentials
//!
//! The tool needs three values before it can issue a completion request: the
//! API key, the resource endpoint, and the deployment name. They are persisted
//! in the OS-native credential store (Keychain, Credential Manager, Secret
//! Service) and never written to disk in plain form.
//!
//! Storage is abstracted behind the [`CredentialStore`] trait so alternate
//! backends can substitute for the OS keyring without touching the CLI layer.

use std::fmt;

use crate::error::{Error, Result};

/// Keyring service name under which all entries are stored
pub const SERVICE_NAME: &str = "ai-cli";

/// The fixed set of logical credential names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKey {
    ApiKey,
    Endpoint,
    Deployment,
}

impl CredentialKey {
    /// Every credential the tool manages, in onboarding order
    pub const ALL: [CredentialKey; 3] = [
        CredentialKey::ApiKey,
        CredentialKey::Endpoint,
        CredentialKey::Deployment,
    ];

    /// Entry name within the keyring service
    pub fn entry_name(self) -> &'static str {
        match self {
            CredentialKey::ApiKey => "azure_openai_api_key",
            CredentialKey::Endpoint => "azure_openai_endpoint",
            CredentialKey::Deployment => "azure_openai_deployment",
        }
    }

    /// Human-readable label used in prompts and delete reports
    pub fn label(self) -> &'static str {
        match self {
            CredentialKey::ApiKey => "API key",
            CredentialKey::Endpoint => "endpoint",
            CredentialKey::Deployment => "deployment name",
        }
    }
}

impl fmt::Display for CredentialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Storage backend for the credential set
///
/// `get` returns `None` for an absent entry; `delete` reports whether an
/// entry existed. Any failure to reach the underlying facility surfaces as
/// [`Error::StoreUnavailable`].
pub trait CredentialStore {
    fn get(&self, key: CredentialKey) -> Result<Option<String>>;
    fn set(&self, key: CredentialKey, value: &str) -> Result<()>;
    fn delete(&self, key: CredentialKey) -> Result<bool>;
}

/// OS-native keyring backend
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    /// Use a non-default service name (isolates tests from real entries)
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: CredentialKey) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service, key.entry_name()).map_err(|e| {
            Error::store_unavailable(format!("cannot open keyring entry for {key}"), e)
        })
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for KeyringStore {
    fn get(&self, key: CredentialKey) -> Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value.trim().to_string())),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(Error::store_unavailable(
                format!("cannot read {key} from secure storage"),
                e,
            )),
        }
    }

    fn set(&self, key: CredentialKey, value: &str) -> Result<()> {
        self.entry(key)?.set_password(value.trim()).map_err(|e| {
            Error::store_unavailable(format!("cannot store {key} in secure storage"), e)
        })
    }

    fn delete(&self, key: CredentialKey) -> Result<bool> {
        match self.entry(key)?.delete_password() {
            Ok(()) => Ok(true),
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(e) => Err(Error::store_unavailable(
                format!("cannot delete {key} from secure storage"),
                e,
            )),
        }
    }
}

/// In-process backend backed by a mutex-guarded map
///
/// Useful where no OS facility is available (headless CI) and as the store
/// double in tests.
#[derive(Default)]
pub struct MemoryStore {
    values: std::sync::Mutex<std::collections::HashMap<CredentialKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: CredentialKey) -> Result<Option<String>> {
        let values = self.values.lock().expect("credential map poisoned");
        Ok(values.get(&key).map(|v| v.trim().to_string()))
    }

    fn set(&self, key: CredentialKey, value: &str) -> Result<()> {
        let mut values = self.values.lock().expect("credential map poisoned");
        values.insert(key, value.trim().to_string());
        Ok(())
    }

    fn delete(&self, key: CredentialKey) -> Result<bool> {
        let mut values = self.values.lock().expect("credential map poisoned");
        Ok(values.remove(&key).is_some())
    }
}

/// The complete credential set required for a completion request
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub endpoint: String,
    pub deployment: String,
}

impl Credentials {
    /// Load the full set, returning `None` if any value is missing or empty
    pub fn load(store: &dyn CredentialStore) -> Result<Option<Credentials>> {
        let api_key = store.get(CredentialKey::ApiKey)?;
        let endpoint = store.get(CredentialKey::Endpoint)?;
        let deployment = store.get(CredentialKey::Deployment)?;

        match (api_key, endpoint, deployment) {
            (Some(api_key), Some(endpoint), Some(deployment))
                if !api_key.is_empty() && !endpoint.is_empty() && !deployment.is_empty() =>
            {
                Ok(Some(Credentials {
                    api_key,
                    endpoint,
                    deployment,
                }))
            }
            _ => Ok(None),
        }
    }

    /// Which credentials are missing or empty
    pub fn missing(store: &dyn CredentialStore) -> Result<Vec<CredentialKey>> {
        let mut missing = Vec::new();
        for key in CredentialKey::ALL {
            match store.get(key)? {
                Some(value) if !value.is_empty() => {}
                _ => missing.push(key),
            }
        }
        Ok(missing)
    }
}

// The API key must never reach logs, even at trace level.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"***")
            .field("endpoint", &self.endpoint)
            .field("deployment", &self.deployment)
            .finish()
    }
}

/// Outcome of deleting a single credential
#[derive(Debug)]
pub struct DeleteReport {
    pub key: CredentialKey,
    pub outcome: Result<bool>,
}

impl DeleteReport {
    /// Deleting an absent entry counts as success
    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Delete every credential, collecting a per-key report
///
/// A key that was never stored is reported as success so the operation is
/// idempotent from the user's perspective.
pub fn delete_all(store: &dyn CredentialStore) -> Vec<DeleteReport> {
    CredentialKey::ALL
        .into_iter()
        .map(|key| DeleteReport {
            key,
            outcome: store.delete(key),
        })
        .collect()
}
