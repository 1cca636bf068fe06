use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub storage: StorageConfig,
    pub audio: AudioConfig,
    pub stt: SttConfig,
    pub assistant: AssistantConfig,
    pub conversation: ConversationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioConfig {
    pub sample_rate: u32,
    pub channels: u16,
    /// Length of each audio window handed to the recognizer, in seconds.
    pub segment_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SttConfig {
    pub endpoint: String,
    /// Transcripts shorter than this many characters are discarded as noise.
    pub min_text_chars: usize,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    pub endpoint: String,
    pub model: String,
    /// Set via COPILOT_ASSISTANT__API_KEY rather than the config file.
    pub api_key: Option<String>,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversationConfig {
    /// Maximum transcript entries retained in the rolling history.
    pub history_cap: usize,
    /// Number of recent entries included in each generation prompt.
    pub context_window: usize,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("COPILOT").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
