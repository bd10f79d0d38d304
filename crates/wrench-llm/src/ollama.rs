//! Ollama chat API client.
//!
//! Talks to a local Ollama instance over its `/api/chat` endpoint with a
//! system + user message pair, non-streaming. One attempt per call: retry
//! policy, if any wanted, belongs to the caller.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ModelError;
use wrench_domain::traits::AnswerModel;

/// Default Ollama API endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemma2:2b";

/// Default timeout for generation requests (seconds). Local generation on
/// small models can legitimately take a while.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Settings for the Ollama client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// API endpoint, e.g. `http://localhost:11434`.
    pub endpoint: String,
    /// Model identifier, e.g. `gemma2:2b`.
    pub model: String,
    /// Per-call timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Chat client for local Ollama inference.
pub struct OllamaClient {
    endpoint: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
    #[allow(dead_code)]
    done: bool,
}

impl OllamaClient {
    /// Create a client from settings.
    pub fn new(config: &OllamaConfig) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ModelError::Communication(format!("failed to build client: {e}")))?;
        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            client,
        })
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }
}

impl AnswerModel for OllamaClient {
    type Error = ModelError;

    async fn generate(&self, system: &str, user: &str) -> Result<String, ModelError> {
        let url = format!("{}/api/chat", self.endpoint);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            stream: false,
        };

        debug!(model = %self.model, "sending chat request");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Timeout
                } else {
                    ModelError::Communication(format!("request failed: {e}"))
                }
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ModelError::ModelNotAvailable(self.model.clone()));
        }
        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ModelError::Communication(format!("HTTP {status}: {detail}")));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(format!("failed to parse response: {e}")))?;

        Ok(chat.message.content)
    }
}
