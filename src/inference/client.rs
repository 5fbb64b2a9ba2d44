//! HTTP client for the hosted chat model.
//!
//! The endpoint speaks the messages format: we send a system directive
//! plus one user message with a bounded `max_tokens`, and read back the
//! first content block of the reply. One attempt per request, no
//! retries; the caller folds failures into its own response.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::InferenceError;

/// Bound on generated output tokens per request.
pub const MAX_OUTPUT_TOKENS: u32 = 1024;

/// Request timeout. Expiry is a recoverable failure, not a fatal one.
const REQUEST_TIMEOUT_SECS: u64 = 60;

const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20240620";

/// Text-in/text-out seam to the hosted model.
#[async_trait]
pub trait LlmGenerate: Send + Sync {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, InferenceError>;
}

/// Production client for the hosted inference endpoint.
pub struct HostedLlmClient {
    endpoint: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl HostedLlmClient {
    pub fn new(endpoint: &str, api_key: &str, model: &str) -> Result<Self, InferenceError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| InferenceError::HttpClient(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            client,
        })
    }

    /// Construct from the ambient environment.
    ///
    /// `INFERENCE_ENDPOINT` and `INFERENCE_API_KEY` are required;
    /// `INFERENCE_MODEL` overrides the default model id. A missing
    /// variable is not fatal to the process; the caller serves in
    /// echo mode instead.
    pub fn from_env() -> Result<Self, InferenceError> {
        let endpoint = std::env::var("INFERENCE_ENDPOINT").map_err(|_| InferenceError::NotConfigured)?;
        let api_key = std::env::var("INFERENCE_API_KEY").map_err(|_| InferenceError::NotConfigured)?;
        let model =
            std::env::var("INFERENCE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(&endpoint, &api_key, &model)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

#[async_trait]
impl LlmGenerate for HostedLlmClient {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, InferenceError> {
        let body = GenerateRequest {
            model: &self.model,
            max_tokens: MAX_OUTPUT_TOKENS,
            system,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    InferenceError::Connection(self.endpoint.clone())
                } else if e.is_timeout() {
                    InferenceError::Timeout(REQUEST_TIMEOUT_SECS)
                } else {
                    InferenceError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Endpoint {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::ResponseParsing(e.to_string()))?;

        parsed
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| InferenceError::ResponseParsing("empty content array".into()))
    }
}

/// Mock model for testing — returns a configured reply or failure.
pub struct MockLlm {
    outcome: Result<String, String>,
}

impl MockLlm {
    pub fn replying(text: &str) -> Self {
        Self {
            outcome: Ok(text.to_string()),
        }
    }

    pub fn failing(detail: &str) -> Self {
        Self {
            outcome: Err(detail.to_string()),
        }
    }
}

#[async_trait]
impl LlmGenerate for MockLlm {
    async fn generate(&self, _system: &str, _prompt: &str) -> Result<String, InferenceError> {
        match &self.outcome {
            Ok(text) => Ok(text.clone()),
            Err(detail) => Err(InferenceError::HttpClient(detail.clone())),
        }
    }
}
