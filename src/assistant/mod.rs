// Answer generation. The `Assistant` trait fronts the external LLM so the
// pipeline and the HTTP handlers can run against a mock in tests.

pub mod gemini;
pub mod prompt;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::model::TranscriptEntry;

pub use gemini::GeminiAssistant;

/// Produces an answer suggestion for an interview question, given the most
/// recent conversation turns as context.
#[async_trait]
pub trait Assistant: Send + Sync {
    async fn generate(&self, context: &[TranscriptEntry], question: &str) -> Result<String>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}

/// Mock assistant for testing.
#[derive(Debug, Clone)]
pub struct MockAssistant {
    response: String,
    should_fail: bool,
}

impl MockAssistant {
    pub fn new() -> Self {
        Self {
            response: "mock answer".to_string(),
            should_fail: false,
        }
    }

    /// Configure the mock to return a specific answer
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = response.to_string();
        self
    }

    /// Configure the mock to fail on generate
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

impl Default for MockAssistant {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Assistant for MockAssistant {
    async fn generate(&self, _context: &[TranscriptEntry], _question: &str) -> Result<String> {
        if self.should_fail {
            Err(anyhow!("mock generation failure"))
        } else {
            Ok(self.response.clone())
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
