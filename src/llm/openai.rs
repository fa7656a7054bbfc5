//! OpenAI-style chat completions gateway
//!
//! Implements the LlmClient trait against a `/v1/chat/completions` endpoint.
//! One call is one request/response: the gateway performs no retries, leaving
//! retry-or-fallback decisions to the orchestration layer.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::{ChatRequest, LlmClient, LlmError};
use crate::config::LlmConfig;

/// OpenAI-compatible chat API client
pub struct OpenAiClient {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
    max_tokens: u32,
    timeout: Duration,
}

impl OpenAiClient {
    /// Create a new client from configuration
    ///
    /// Fails fast with `MissingApiKey` when the configured environment
    /// variable is unset or empty - an unauthenticated request is never sent.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        debug!(model = %config.model, base_url = %config.base_url, "from_config: called");
        let api_key = config
            .get_api_key()
            .ok_or_else(|| LlmError::MissingApiKey(config.api_key_env.clone()))?;

        let timeout = Duration::from_millis(config.timeout_ms);
        let http = Client::builder().timeout(timeout).build().map_err(LlmError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            base_url: config.base_url.clone(),
            http,
            max_tokens: config.max_tokens,
            timeout,
        })
    }

    /// Build the request body for the chat completions API
    fn build_request_body(&self, request: &ChatRequest) -> serde_json::Value {
        debug!(model = %self.model, max_tokens = request.max_tokens, "build_request_body: called");
        serde_json::json!({
            "model": self.model,
            "messages": request.messages(),
            "max_tokens": request.max_tokens.min(self.max_tokens),
            "temperature": request.temperature,
        })
    }

    /// Map a non-2xx status to the error taxonomy
    fn error_for_status(status: u16, retry_after: Option<u64>, message: String) -> LlmError {
        match status {
            401 => LlmError::Unauthorized,
            429 => LlmError::RateLimited {
                retry_after: Duration::from_secs(retry_after.unwrap_or(60)),
            },
            s if s >= 500 => LlmError::Server { status: s, message },
            s => LlmError::Api { status: s, message },
        }
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, request: ChatRequest) -> Result<String, LlmError> {
        debug!(context = request.context, model = %self.model, "complete: called");
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = self.build_request_body(&request);
        let started = Instant::now();

        let response = match self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                let latency_ms = started.elapsed().as_millis() as u64;
                let error = if e.is_timeout() {
                    LlmError::Timeout(self.timeout)
                } else {
                    LlmError::Network(e)
                };
                warn!(context = request.context, latency_ms, outcome = %error, "complete: transport failure");
                return Err(error);
            }
        };

        let status = response.status().as_u16();
        let latency_ms = started.elapsed().as_millis() as u64;

        if !response.status().is_success() {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            let message = response.text().await.unwrap_or_default();
            let error = Self::error_for_status(status, retry_after, message);
            warn!(context = request.context, latency_ms, status, outcome = %error, "complete: API failure");
            return Err(error);
        }

        let api_response: ChatResponse = match response.json().await {
            Ok(r) => r,
            Err(e) => {
                warn!(context = request.context, latency_ms, error = %e, "complete: undecodable response body");
                return Err(LlmError::Protocol(format!("Undecodable response body: {}", e)));
            }
        };

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                warn!(context = request.context, latency_ms, "complete: response missing message content");
                LlmError::Protocol("Response missing choices[0].message.content".to_string())
            })?;

        info!(
            context = request.context,
            latency_ms,
            chars = content.len(),
            outcome = "ok",
            "complete: success"
        );
        Ok(content)
    }
}

// Chat completions response types

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}
