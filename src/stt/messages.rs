use serde::{Deserialize, Serialize};

/// Transcription request posted to the STT service
#[derive(Debug, Serialize, Deserialize)]
pub struct TranscribeRequest {
    pub pcm: String,  // Base64-encoded i16 little-endian PCM bytes
    pub sample_rate: u32,
    pub channels: u16,
    pub timestamp: String,  // RFC3339 timestamp
}

/// Transcription result returned by the STT service
#[derive(Debug, Serialize, Deserialize)]
pub struct TranscribeResponse {
    pub text: String,
    pub confidence: Option<f32>,
}
