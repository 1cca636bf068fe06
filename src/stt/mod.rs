// Speech-to-text. The `Transcriber` trait fronts the external recognizer;
// production posts audio to an HTTP STT service, tests script a mock.

pub mod http;
pub mod messages;

use std::collections::VecDeque;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::audio::AudioSegment;

pub use http::HttpTranscriber;

/// Result of transcribing one audio segment.
#[derive(Debug, Clone)]
pub struct Transcription {
    pub text: String,
    /// Recognizer confidence, when the service reports one.
    pub confidence: Option<f32>,
}

/// Trait for speech-to-text transcription.
///
/// This trait allows swapping implementations (real STT service vs mock).
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe one mono audio segment to text.
    async fn transcribe(&self, segment: &AudioSegment) -> Result<Transcription>;

    /// Name of the recognizer, for logging.
    fn name(&self) -> &str;
}

enum Scripted {
    Text(String),
    Failure(String),
}

/// Mock transcriber for testing. Scripted replies are consumed in order;
/// once exhausted it falls back to a fixed text.
#[derive(Default)]
pub struct MockTranscriber {
    script: Mutex<VecDeque<Scripted>>,
}

impl MockTranscriber {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for the next transcribe call
    pub fn with_response(mut self, text: &str) -> Self {
        self.script.get_mut().push_back(Scripted::Text(text.to_string()));
        self
    }

    /// Queue a failure for the next transcribe call
    pub fn with_failure(mut self) -> Self {
        self.script
            .get_mut()
            .push_back(Scripted::Failure("mock transcription failure".to_string()));
        self
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, _segment: &AudioSegment) -> Result<Transcription> {
        let next = self.script.lock().await.pop_front();
        match next {
            Some(Scripted::Text(text)) => Ok(Transcription {
                text,
                confidence: None,
            }),
            Some(Scripted::Failure(message)) => Err(anyhow!(message)),
            None => Ok(Transcription {
                text: "mock transcription".to_string(),
                confidence: None,
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
