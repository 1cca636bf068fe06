// In-memory store backend. State lives for the life of the process.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::model::{AiResponse, Session, TranscriptEntry};

use super::{Collections, SessionStore, StoreResult};

/// Volatile store used by tests and by runs that do not need persistence.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn insert_session(&self, session: Session) -> StoreResult<Session> {
        let mut inner = self.inner.write().await;
        inner.sessions.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    async fn get_session(&self, session_id: &str) -> StoreResult<Session> {
        let inner = self.inner.read().await;
        inner.session(session_id)
    }

    async fn list_sessions(&self) -> StoreResult<Vec<Session>> {
        let inner = self.inner.read().await;
        Ok(inner.sessions_by_age())
    }

    async fn add_transcript(&self, entry: TranscriptEntry) -> StoreResult<TranscriptEntry> {
        let mut inner = self.inner.write().await;
        inner.require_session(&entry.session_id)?;
        inner.transcripts.push(entry.clone());
        Ok(entry)
    }

    async fn transcripts_for(&self, session_id: &str) -> StoreResult<Vec<TranscriptEntry>> {
        let inner = self.inner.read().await;
        Ok(inner.transcripts_by_age(session_id))
    }

    async fn add_response(&self, response: AiResponse) -> StoreResult<AiResponse> {
        let mut inner = self.inner.write().await;
        inner.require_session(&response.session_id)?;
        inner.responses.push(response.clone());
        Ok(response)
    }

    async fn responses_for(&self, session_id: &str) -> StoreResult<Vec<AiResponse>> {
        let inner = self.inner.read().await;
        Ok(inner.responses_by_age(session_id))
    }
}
