use crate::config::Config;

/// Configuration for a copilot listening session
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Session identifier used for persisted records
    pub session_id: String,

    /// Duration of each audio window handed to the recognizer
    pub segment_secs: u64,

    /// Sample rate for recognition (16kHz typical)
    pub sample_rate: u32,

    /// Channels requested from the capture device
    pub channels: u16,

    /// Recognized text shorter than this many characters is dropped as noise
    pub min_text_chars: usize,

    /// Maximum entries kept in the rolling conversation history
    pub history_cap: usize,

    /// Entries included in each generation prompt
    pub context_window: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            session_id: format!("interview-{}", uuid::Uuid::new_v4()),
            segment_secs: 8,
            sample_rate: 16000,
            channels: 1,
            min_text_chars: 3,
            history_cap: 10,
            context_window: 5,
        }
    }
}

impl PipelineConfig {
    /// Derive a pipeline config from the application config.
    pub fn from_app_config(config: &Config) -> Self {
        Self {
            session_id: format!("interview-{}", uuid::Uuid::new_v4()),
            segment_secs: config.audio.segment_secs,
            sample_rate: config.audio.sample_rate,
            channels: config.audio.channels,
            min_text_chars: config.stt.min_text_chars,
            history_cap: config.conversation.history_cap,
            context_window: config.conversation.context_window,
        }
    }
}
