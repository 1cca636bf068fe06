use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::assistant::Assistant;
use crate::store::SessionStore;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Record store (sessions, transcripts, AI responses)
    pub store: Arc<dyn SessionStore>,

    /// Answer generator
    pub assistant: Arc<dyn Assistant>,

    /// Transcript entries included in each generation prompt
    pub context_window: usize,

    /// Per-session locks serializing answer generation (session_id → lock)
    generation_locks: Arc<RwLock<HashMap<String, Arc<Mutex<()>>>>>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn SessionStore>,
        assistant: Arc<dyn Assistant>,
        context_window: usize,
    ) -> Self {
        Self {
            store,
            assistant,
            context_window,
            generation_locks: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Lock guarding answer generation for one session. Concurrent
    /// generation requests against the same session queue on it.
    pub async fn generation_lock(&self, session_id: &str) -> Arc<Mutex<()>> {
        {
            let locks = self.generation_locks.read().await;
            if let Some(lock) = locks.get(session_id) {
                return Arc::clone(lock);
            }
        }

        let mut locks = self.generation_locks.write().await;
        Arc::clone(locks.entry(session_id.to_string()).or_default())
    }
}
