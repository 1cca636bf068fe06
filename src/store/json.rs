// JSON-file store backend. One file per collection under a data directory.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;

use crate::model::{AiResponse, Session, TranscriptEntry};

use super::{Collections, SessionStore, StoreResult};

const SESSIONS_FILE: &str = "sessions.json";
const TRANSCRIPTS_FILE: &str = "transcripts.json";
const RESPONSES_FILE: &str = "responses.json";

/// Durable store that snapshots each collection to pretty-printed JSON
/// after every write. Loads existing snapshots on open.
pub struct JsonStore {
    data_dir: PathBuf,
    inner: RwLock<Collections>,
}

impl JsonStore {
    pub fn open(data_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;

        let mut collections = Collections::default();
        let sessions: Vec<Session> = load_collection(&data_dir.join(SESSIONS_FILE))?;
        collections.sessions = sessions.into_iter().map(|s| (s.id.clone(), s)).collect();
        collections.transcripts = load_collection(&data_dir.join(TRANSCRIPTS_FILE))?;
        collections.responses = load_collection(&data_dir.join(RESPONSES_FILE))?;

        info!(
            "Opened JSON store at {:?} ({} sessions, {} transcripts, {} responses)",
            data_dir,
            collections.sessions.len(),
            collections.transcripts.len(),
            collections.responses.len()
        );

        Ok(Self {
            data_dir,
            inner: RwLock::new(collections),
        })
    }

    fn save_sessions(&self, collections: &Collections) -> StoreResult<()> {
        save_collection(&self.data_dir.join(SESSIONS_FILE), &collections.sessions_by_age())
    }

    fn save_transcripts(&self, collections: &Collections) -> StoreResult<()> {
        save_collection(&self.data_dir.join(TRANSCRIPTS_FILE), &collections.transcripts)
    }

    fn save_responses(&self, collections: &Collections) -> StoreResult<()> {
        save_collection(&self.data_dir.join(RESPONSES_FILE), &collections.responses)
    }
}

fn load_collection<T: DeserializeOwned>(path: &Path) -> StoreResult<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

fn save_collection<T: Serialize>(path: &Path, records: &[T]) -> StoreResult<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;
    Ok(())
}

#[async_trait]
impl SessionStore for JsonStore {
    async fn insert_session(&self, session: Session) -> StoreResult<Session> {
        let mut inner = self.inner.write().await;
        inner.sessions.insert(session.id.clone(), session.clone());
        self.save_sessions(&inner)?;
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
        self.save_transcripts(&inner)?;
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
        self.save_responses(&inner)?;
        Ok(response)
    }

    async fn responses_for(&self, session_id: &str) -> StoreResult<Vec<AiResponse>> {
        let inner = self.inner.read().await;
        Ok(inner.responses_by_age(session_id))
    }
}
