//! Azure OpenAI chat completion client
//!
//! Issues the single synchronous request/response call the tool performs:
//! one system message, one user message, one text answer. Failures are
//! translated into the crate error taxonomy (authentication vs network vs
//! service) and are never retried.

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::credentials::Credentials;
use crate::error::{Error, Result};

/// Azure OpenAI REST API version the request is pinned to
pub const API_VERSION: &str = "2024-02-15-preview";

/// Request timeout for the completion call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

// Fixed sampling parameters for every request.
const TEMPERATURE: f32 = 0.7;
const TOP_P: f32 = 0.95;
const MAX_TOKENS: i32 = 16384;

#[derive(Debug, Serialize)]
struct ChatRequest {
    messages: Vec<ChatMessage>,
    temperature: f32,
    top_p: f32,
    max_tokens: i32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: Vec<MessageContent>,
}

#[derive(Debug, Serialize)]
struct MessageContent {
    #[serde(rename = "type")]
    content_type: &'static str,
    text: String,
}

impl ChatMessage {
    fn text(role: &'static str, text: impl Into<String>) -> Self {
        Self {
            role,
            content: vec![MessageContent {
                content_type: "text",
                text: text.into(),
            }],
        }
    }
}

impl ChatRequest {
    fn new(system_prompt: &str, user_input: &str) -> Self {
        Self {
            messages: vec![
                ChatMessage::text("system", system_prompt),
                ChatMessage::text("user", user_input),
            ],
            temperature: TEMPERATURE,
            top_p: TOP_P,
            max_tokens: MAX_TOKENS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Client for a single Azure OpenAI deployment
pub struct CompletionClient {
    http: reqwest::Client,
    url: Url,
    api_key: String,
}

impl CompletionClient {
    /// Build a client from the stored credential set
    ///
    /// Validates the endpoint URL up front so a typo surfaces as a
    /// configuration error rather than a confusing network failure.
    pub fn new(credentials: &Credentials) -> Result<Self> {
        let url = Url::parse(&format!(
            "{}/openai/deployments/{}/chat/completions?api-version={API_VERSION}",
            credentials.endpoint.trim_end_matches('/'),
            credentials.deployment
        ))
        .map_err(|e| Error::Configuration {
            message: format!("invalid endpoint URL '{}'", credentials.endpoint),
            source: Some(e.into()),
        })?;

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Network {
                message: format!("failed to create HTTP client: {e}"),
                source: Some(e.into()),
            })?;

        Ok(Self {
            http,
            url,
            api_key: credentials.api_key.clone(),
        })
    }

    /// Send the system prompt and user input, returning the completion text
    pub async fn complete(&self, system_prompt: &str, user_input: &str) -> Result<String> {
        let request = ChatRequest::new(system_prompt, user_input);
        debug!(url = %self.url, input_bytes = user_input.len(), "sending completion request");

        let response = self
            .http
            .post(self.url.clone())
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_response(status, &body));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| Error::Service {
            status_code: Some(status.as_u16()),
            provider_code: None,
            message: format!("response body was not valid JSON: {e}"),
        })?;

        extract_completion_text(parsed)
    }

    /// The fully-resolved request URL (without credentials)
    pub fn request_url(&self) -> &Url {
        &self.url
    }
}

fn extract_completion_text(response: ChatResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| Error::Service {
            status_code: None,
            provider_code: None,
            message: "response contained no completion text".to_string(),
        })
}

fn classify_transport_error(e: reqwest::Error) -> Error {
    let message = if e.is_timeout() {
        format!("request timed out after {}s", REQUEST_TIMEOUT.as_secs())
    } else if e.is_connect() {
        format!("could not connect to endpoint: {e}")
    } else {
        format!("request failed: {e}")
    };
    Error::Network {
        message,
        source: Some(e.into()),
    }
}

/// Translate a non-success response into the error taxonomy
///
/// 401/403 mean the stored key was rejected; everything else (including 429
/// rate limiting and 5xx) is a service error carrying whatever code and
/// message the body exposes.
fn error_from_response(status: StatusCode, body: &str) -> Error {
    let (provider_code, message) = extract_provider_error(body);

    match status.as_u16() {
        401 | 403 => Error::Authentication {
            message: if message.is_empty() {
                "the service rejected the stored API key".to_string()
            } else {
                message
            },
        },
        _ => Error::Service {
            status_code: Some(status.as_u16()),
            provider_code,
            message: if message.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                message
            },
        },
    }
}

/// Pull the error code and message out of an OpenAI-shaped error body
fn extract_provider_error(body: &str) -> (Option<String>, String) {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return (None, body.trim().to_string());
    };

    if let Some(error) = json.get("error") {
        let code = error
            .get("code")
            .and_then(|c| c.as_str())
            .map(|s| s.to_string());
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or_else(|| body.trim())
            .to_string();
        return (code, message);
    }

    if let Some(message) = json.get("message").and_then(|m| m.as_str()) {
        return (None, message.to_string());
    }

    (None, body.trim().to_string())
}
