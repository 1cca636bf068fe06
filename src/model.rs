// Domain records shared by the store, the HTTP API, and the listening pipeline.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who produced a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeakerRole {
    Interviewer,
    Candidate,
}

impl fmt::Display for SpeakerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeakerRole::Interviewer => write!(f, "interviewer"),
            SpeakerRole::Candidate => write!(f, "candidate"),
        }
    }
}

/// An interview session. Groups transcripts and AI responses under one id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    /// Session with a caller-chosen id (the listening pipeline names its own).
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: Utc::now(),
            is_active: true,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// One recognized utterance attributed to a speaker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub id: String,
    pub session_id: String,
    pub speaker: SpeakerRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Recognizer confidence, when the recognizer reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl TranscriptEntry {
    pub fn new(session_id: impl Into<String>, speaker: SpeakerRole, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            session_id: session_id.into(),
            speaker,
            text: text.into(),
            timestamp: Utc::now(),
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// A generated answer suggestion paired with the question that prompted it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiResponse {
    pub id: String,
    pub session_id: String,
    pub question: String,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

impl AiResponse {
    pub fn new(
        session_id: impl Into<String>,
        question: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            session_id: session_id.into(),
            question: question.into(),
            response: response.into(),
            timestamp: Utc::now(),
        }
    }
}
