//! Wrench LLM Provider Layer
//!
//! Implementations of the `AnswerModel` trait from `wrench-domain`.
//!
//! # Providers
//!
//! - `MockModel`: deterministic mock for testing
//! - `OllamaClient`: local Ollama chat API integration

#![warn(missing_docs)]

pub mod ollama;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use wrench_domain::traits::AnswerModel;

pub use ollama::{OllamaClient, OllamaConfig};

/// Errors that can occur during model operations.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Network or API communication error.
    #[error("communication error: {0}")]
    Communication(String),

    /// The call exceeded its timeout.
    #[error("model call timed out")]
    Timeout,

    /// The requested model is not available on the server.
    #[error("model not available: {0}")]
    ModelNotAvailable(String),

    /// Response could not be parsed.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Canned behavior for one mock call.
#[derive(Debug, Clone)]
enum Canned {
    Completion(String),
    Failure,
    Timeout,
}

impl Canned {
    fn produce(&self) -> Result<String, ModelError> {
        match self {
            Canned::Completion(text) => Ok(text.clone()),
            Canned::Failure => Err(ModelError::Communication("mock failure".to_string())),
            Canned::Timeout => Err(ModelError::Timeout),
        }
    }
}

/// Mock model for deterministic testing.
///
/// Returns pre-configured completions without network calls, keyed by the
/// user prompt, with a call counter so tests can assert the decline path
/// never reaches the model.
#[derive(Debug, Clone)]
pub struct MockModel {
    default: Canned,
    responses: Arc<Mutex<HashMap<String, Canned>>>,
    call_count: Arc<Mutex<usize>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockModel {
    /// A mock with a fixed completion for all prompts.
    pub fn new(completion: impl Into<String>) -> Self {
        Self {
            default: Canned::Completion(completion.into()),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A mock where every call fails with a communication error.
    pub fn always_failing() -> Self {
        Self {
            default: Canned::Failure,
            ..Self::new("")
        }
    }

    /// A mock where every call times out.
    pub fn always_timing_out() -> Self {
        Self {
            default: Canned::Timeout,
            ..Self::new("")
        }
    }

    /// Register a specific completion for a user prompt.
    pub fn add_response(&mut self, user_prompt: impl Into<String>, completion: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(user_prompt.into(), Canned::Completion(completion.into()));
    }

    /// Make a specific user prompt fail with a communication error.
    pub fn add_failure(&mut self, user_prompt: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(user_prompt.into(), Canned::Failure);
    }

    /// Number of times `generate` was called.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// User prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockModel {
    fn default() -> Self {
        Self::new("Default mock completion")
    }
}

impl AnswerModel for MockModel {
    type Error = ModelError;

    async fn generate(&self, _system: &str, user: &str) -> Result<String, ModelError> {
        *self.call_count.lock().unwrap() += 1;
        self.prompts.lock().unwrap().push(user.to_string());

        if let Some(canned) = self.responses.lock().unwrap().get(user) {
            return canned.produce();
        }
        self.default.produce()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_default_completion() {
        let mock = MockModel::new("Restart the license server.");
        let out = mock.generate("sys", "any prompt").await.unwrap();
        assert_eq!(out, "Restart the license server.");
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_specific_responses() {
        let mut mock = MockModel::default();
        mock.add_response("prompt-a", "answer-a");
        mock.add_failure("prompt-b");

        assert_eq!(mock.generate("s", "prompt-a").await.unwrap(), "answer-a");
        assert!(matches!(
            mock.generate("s", "prompt-b").await,
            Err(ModelError::Communication(_))
        ));
        assert_eq!(
            mock.generate("s", "other").await.unwrap(),
            "Default mock completion"
        );
    }

    #[tokio::test]
    async fn test_always_failing_and_timing_out() {
        assert!(matches!(
            MockModel::always_failing().generate("s", "u").await,
            Err(ModelError::Communication(_))
        ));
        assert!(matches!(
            MockModel::always_timing_out().generate("s", "u").await,
            Err(ModelError::Timeout)
        ));
    }

    #[tokio::test]
    async fn test_call_count_shared_across_clones() {
        let mock = MockModel::new("x");
        let clone = mock.clone();
        mock.generate("s", "u").await.unwrap();
        assert_eq!(clone.call_count(), 1);
    }
}
