// Persistence for sessions, transcripts, and AI responses.
//
// Two interchangeable backends sit behind the `SessionStore` trait: an
// in-memory store for tests and short-lived runs, and a JSON-file store
// that survives restarts.

pub mod json;
pub mod memory;

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{AiResponse, Session, TranscriptEntry};

pub use json::JsonStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage contract for the interview copilot.
///
/// Writes against an unknown session fail with `SessionNotFound`; list
/// reads for an unknown session return an empty vector. Transcript and
/// response listings are ordered oldest first.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert_session(&self, session: Session) -> StoreResult<Session>;
    async fn get_session(&self, session_id: &str) -> StoreResult<Session>;
    async fn list_sessions(&self) -> StoreResult<Vec<Session>>;

    async fn add_transcript(&self, entry: TranscriptEntry) -> StoreResult<TranscriptEntry>;
    async fn transcripts_for(&self, session_id: &str) -> StoreResult<Vec<TranscriptEntry>>;

    async fn add_response(&self, response: AiResponse) -> StoreResult<AiResponse>;
    async fn responses_for(&self, session_id: &str) -> StoreResult<Vec<AiResponse>>;
}

/// Shared record collections held by both store backends.
#[derive(Debug, Default)]
pub(crate) struct Collections {
    pub sessions: HashMap<String, Session>,
    pub transcripts: Vec<TranscriptEntry>,
    pub responses: Vec<AiResponse>,
}

impl Collections {
    pub fn require_session(&self, session_id: &str) -> StoreResult<()> {
        if self.sessions.contains_key(session_id) {
            Ok(())
        } else {
            Err(StoreError::SessionNotFound(session_id.to_string()))
        }
    }

    pub fn session(&self, session_id: &str) -> StoreResult<Session> {
        self.sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| StoreError::SessionNotFound(session_id.to_string()))
    }

    pub fn sessions_by_age(&self) -> Vec<Session> {
        let mut sessions: Vec<Session> = self.sessions.values().cloned().collect();
        sessions.sort_by_key(|s| s.created_at);
        sessions
    }

    pub fn transcripts_by_age(&self, session_id: &str) -> Vec<TranscriptEntry> {
        let mut entries: Vec<TranscriptEntry> = self
            .transcripts
            .iter()
            .filter(|t| t.session_id == session_id)
            .cloned()
            .collect();
        entries.sort_by_key(|t| t.timestamp);
        entries
    }

    pub fn responses_by_age(&self, session_id: &str) -> Vec<AiResponse> {
        let mut responses: Vec<AiResponse> = self
            .responses
            .iter()
            .filter(|r| r.session_id == session_id)
            .cloned()
            .collect();
        responses.sort_by_key(|r| r.timestamp);
        responses
    }
}
