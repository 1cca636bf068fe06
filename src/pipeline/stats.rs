use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{AiResponse, TranscriptEntry};

/// Statistics about a listening session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineStats {
    /// Whether the pipeline is currently listening
    pub is_listening: bool,

    /// When listening started
    pub started_at: DateTime<Utc>,

    /// Total duration in seconds
    pub duration_secs: f64,

    /// Audio segments handed to the recognizer
    pub segments_captured: usize,

    /// Transcript entries recognized (after the noise filter)
    pub transcripts_recognized: usize,

    /// Answer suggestions generated
    pub answers_generated: usize,
}

/// Pipeline output drained by a display sink.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    /// A recognized conversation turn
    Transcript(TranscriptEntry),
    /// An answer suggestion for a detected question
    Answer(AiResponse),
}
