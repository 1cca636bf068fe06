pub mod assistant;
pub mod audio;
pub mod config;
pub mod display;
pub mod http;
pub mod model;
pub mod pipeline;
pub mod store;
pub mod stt;

pub use assistant::{Assistant, GeminiAssistant};
pub use audio::{
    AudioBackend, AudioBackendConfig, AudioBackendFactory, AudioFrame, AudioSegment, AudioSource,
    FileBackend, MicrophoneBackend, SegmentBuilder,
};
pub use config::Config;
pub use http::{create_router, AppState};
pub use model::{AiResponse, Session, SpeakerRole, TranscriptEntry};
pub use pipeline::{CopilotSession, PipelineConfig, PipelineEvent, PipelineStats};
pub use store::{JsonStore, MemoryStore, SessionStore, StoreError};
pub use stt::{HttpTranscriber, Transcriber, Transcription};
