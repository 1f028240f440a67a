//! ai core - credential storage, input resolution, and completions
//!
//! This crate provides the non-interactive core of the `ai` command-line
//! tool: the credential store adapter over the OS keyring, the
//! file-or-literal resolution of the input and prompt arguments, and the
//! Azure OpenAI chat completion client.
//!
//! # Main Components
//!
//! - **Error Handling**: domain error taxonomy using `thiserror`
//! - **Credentials**: the [`CredentialStore`] seam with keyring and
//!   in-memory backends
//! - **Resolution**: file-vs-literal policy for input and prompt arguments
//! - **Completion Client**: the single request/response call to an Azure
//!   OpenAI deployment

pub mod completion;
pub mod credentials;
pub mod error;
pub mod resolve;

// Re-export main types for convenience
pub use completion::{CompletionClient, API_VERSION};
pub use credentials::{
    delete_all, CredentialKey, CredentialStore, Credentials, DeleteReport, KeyringStore,
    MemoryStore, SERVICE_NAME,
};
pub use error::{Error, Result};
pub use resolve::{resolve_input, resolve_prompt, DEFAULT_SYSTEM_PROMPT, MAX_FILE_BYTES};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
