use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use tracing::debug;

use crate::audio::AudioSegment;
use crate::config::SttConfig;

use super::messages::{TranscribeRequest, TranscribeResponse};
use super::{Transcriber, Transcription};

/// Transcriber backed by an external HTTP STT service.
pub struct HttpTranscriber {
    client: Client,
    endpoint: String,
}

impl HttpTranscriber {
    pub fn from_config(config: &SttConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl Transcriber for HttpTranscriber {
    async fn transcribe(&self, segment: &AudioSegment) -> Result<Transcription> {
        let pcm_bytes = segment.to_pcm_bytes();

        let request = TranscribeRequest {
            pcm: base64::engine::general_purpose::STANDARD.encode(&pcm_bytes),
            sample_rate: segment.sample_rate,
            channels: 1,
            timestamp: segment.captured_at.to_rfc3339(),
        };

        debug!(
            "Posting {} PCM bytes to STT ({:.1}s window)",
            pcm_bytes.len(),
            segment.duration_seconds()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .context("Failed to reach STT service")?;

        if !response.status().is_success() {
            return Err(anyhow!("STT service error: {}", response.status()));
        }

        let resp: TranscribeResponse = response.json().await?;
        Ok(Transcription {
            text: resp.text,
            confidence: resp.confidence,
        })
    }

    fn name(&self) -> &str {
        "http-stt"
    }
}
