// Gemini generateContent client. Speaks the v1beta REST API directly: the
// system instruction and the assembled prompt go out as JSON, the first
// candidate's text comes back.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::AssistantConfig;
use crate::model::TranscriptEntry;

use super::{prompt, Assistant};

#[derive(Clone)]
pub struct GeminiAssistant {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    generation: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: ContentPayload,
    contents: Vec<ContentPayload>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
struct ContentPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<TextPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TextPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

impl GeminiAssistant {
    pub fn from_config(config: &AssistantConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .context("Missing Gemini API key (set COPILOT_ASSISTANT__API_KEY)")?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            generation: GenerationConfig {
                temperature: config.temperature,
                top_p: config.top_p,
                top_k: config.top_k,
                max_output_tokens: config.max_output_tokens,
            },
        })
    }
}

#[async_trait]
impl Assistant for GeminiAssistant {
    async fn generate(&self, context: &[TranscriptEntry], question: &str) -> Result<String> {
        let request_body = GenerateContentRequest {
            system_instruction: ContentPayload {
                role: None,
                parts: vec![TextPart {
                    text: prompt::SYSTEM_INSTRUCTION.to_string(),
                }],
            },
            contents: vec![ContentPayload {
                role: Some("user".to_string()),
                parts: vec![TextPart {
                    text: prompt::build_prompt(context, question),
                }],
            }],
            generation_config: self.generation.clone(),
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!("Gemini API error: {}", response.status()));
        }

        let resp_json: GenerateContentResponse = response.json().await?;
        let text = extract_text(&resp_json);
        if text.is_empty() {
            return Err(anyhow!("Gemini returned no answer text"));
        }
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Concatenates the text parts of the first candidate.
fn extract_text(response: &GenerateContentResponse) -> String {
    response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
        .trim()
        .to_string()
}
