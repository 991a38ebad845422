//! HTTP client for the Gemini `generateContent` REST endpoint.
//!
//! Wraps `reqwest` with API key handling, request building, and mapping of
//! every failure (transport, non-2xx, malformed or empty body) onto the
//! classified [`ChatError`] variants.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use crate::classify::classify;
use crate::error::ChatError;
use crate::types::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for one Gemini model.
///
/// Use [`GeminiClient::new`] for production or [`GeminiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: Url,
}

impl GeminiClient {
    /// Creates a client pointed at the production Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::InvalidConfig`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, ChatError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::InvalidConfig`] if the `reqwest::Client` cannot be
    /// constructed or `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ChatError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("earthguard/0.1 (eco-assistant)")
            .build()
            .map_err(|e| ChatError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;

        // Exactly one trailing slash so `join` appends below the base path.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| ChatError::InvalidConfig(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            base_url,
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends `prompt` as a single-turn request and returns the reply text.
    ///
    /// # Errors
    ///
    /// - [`ChatError::Auth`] when the key is rejected.
    /// - [`ChatError::QuotaExceeded`] when a rate or quota limit is hit.
    /// - [`ChatError::Transient`] for network failures, timeouts, other
    ///   non-2xx statuses, and malformed or text-less responses.
    pub async fn generate_content(&self, prompt: &str) -> Result<String, ChatError> {
        let url = self.build_url()?;
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::error_from_body(status, &body));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| ChatError::Transient(format!("malformed generateContent response: {e}")))?;

        parsed
            .text()
            .ok_or_else(|| ChatError::Transient("response contained no text".to_string()))
    }

    /// `{base}/v1beta/models/{model}:generateContent`
    fn build_url(&self) -> Result<Url, ChatError> {
        self.base_url
            .join(&format!("v1beta/models/{}:generateContent", self.model))
            .map_err(|e| ChatError::InvalidConfig(format!("invalid model name '{}': {e}", self.model)))
    }

    /// Classifies a non-2xx response from its status and Google error body.
    fn error_from_body(status: StatusCode, body: &str) -> ChatError {
        let envelope = serde_json::from_str::<ErrorEnvelope>(body).ok();
        let rpc_status = envelope.as_ref().and_then(|e| e.error.status.as_deref());
        let message = envelope
            .as_ref()
            .map(|e| e.error.message.clone())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP {status}"));

        let kind = classify(Some(status.as_u16()), rpc_status, &message);
        ChatError::upstream(kind, message)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
