use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::assistant::Assistant;
use crate::audio::{AudioBackend, SegmentBuilder};
use crate::model::{AiResponse, Session, SpeakerRole, TranscriptEntry};
use crate::store::{SessionStore, StoreError};
use crate::stt::Transcriber;

use super::config::PipelineConfig;
use super::filter;
use super::history::ConversationHistory;
use super::stats::{PipelineEvent, PipelineStats};

/// How long the capture worker waits on the frame channel before
/// re-checking the listening flag.
const FRAME_RECV_TIMEOUT: Duration = Duration::from_millis(250);

/// A listening session that wires capture, transcription, question
/// filtering, and answer generation into one pipeline.
///
/// `start` spawns one worker per stage; stages hand work down bounded
/// channels, so consumption order always matches production order.
/// Stopping flips the shared listening flag and joins the workers.
pub struct CopilotSession {
    /// Session configuration
    config: PipelineConfig,

    /// Speech recognizer for captured segments
    transcriber: Arc<dyn Transcriber>,

    /// Answer generator for detected questions
    assistant: Arc<dyn Assistant>,

    /// Optional persistence side channel
    store: Option<Arc<dyn SessionStore>>,

    /// When the session was created
    started_at: DateTime<Utc>,

    /// Whether the pipeline is currently listening
    is_listening: Arc<AtomicBool>,

    /// Segments handed to the recognizer
    segments_captured: Arc<AtomicUsize>,

    /// Transcript entries that survived the noise filter
    transcripts_recognized: Arc<AtomicUsize>,

    /// Answer suggestions generated
    answers_generated: Arc<AtomicUsize>,

    /// Rolling conversation context shared by the workers
    history: Arc<Mutex<ConversationHistory>>,

    /// Handle for the capture/segmentation worker
    capture_task: Arc<Mutex<Option<JoinHandle<()>>>>,

    /// Handle for the transcription worker
    transcribe_task: Arc<Mutex<Option<JoinHandle<()>>>>,

    /// Handle for the response worker
    respond_task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl CopilotSession {
    /// Create a new copilot session
    pub fn new(
        config: PipelineConfig,
        transcriber: Arc<dyn Transcriber>,
        assistant: Arc<dyn Assistant>,
        store: Option<Arc<dyn SessionStore>>,
    ) -> Self {
        info!("Creating copilot session: {}", config.session_id);

        let history_cap = config.history_cap;

        Self {
            config,
            transcriber,
            assistant,
            store,
            started_at: Utc::now(),
            is_listening: Arc::new(AtomicBool::new(false)),
            segments_captured: Arc::new(AtomicUsize::new(0)),
            transcripts_recognized: Arc::new(AtomicUsize::new(0)),
            answers_generated: Arc::new(AtomicUsize::new(0)),
            history: Arc::new(Mutex::new(ConversationHistory::new(history_cap))),
            capture_task: Arc::new(Mutex::new(None)),
            transcribe_task: Arc::new(Mutex::new(None)),
            respond_task: Arc::new(Mutex::new(None)),
        }
    }

    /// Start listening on the given capture backend.
    ///
    /// Returns the event stream for a display sink. The stream closes when
    /// the pipeline stops (or the backend reaches end of input).
    pub async fn start(
        &self,
        mut backend: Box<dyn AudioBackend>,
    ) -> Result<mpsc::Receiver<PipelineEvent>> {
        if self.is_listening.load(Ordering::SeqCst) {
            anyhow::bail!("Session is already listening");
        }

        info!(
            "Starting copilot session: {} (backend: {})",
            self.config.session_id,
            backend.name()
        );

        // Make sure persisted records will have a session to hang off
        if let Some(store) = &self.store {
            match store.get_session(&self.config.session_id).await {
                Ok(_) => {}
                Err(StoreError::SessionNotFound(_)) => {
                    store
                        .insert_session(Session::with_id(&self.config.session_id))
                        .await
                        .context("Failed to register session in store")?;
                    info!("Registered session {} in store", self.config.session_id);
                }
                Err(e) => return Err(e.into()),
            }
        }

        self.is_listening.store(true, Ordering::SeqCst);

        let frames_rx = match backend.start().await.context("Failed to start audio capture") {
            Ok(rx) => rx,
            Err(e) => {
                self.is_listening.store(false, Ordering::SeqCst);
                return Err(e);
            }
        };

        let (segment_tx, segment_rx) = mpsc::channel(16);
        let (entry_tx, entry_rx) = mpsc::channel(100);
        let (event_tx, event_rx) = mpsc::channel(100);

        // Capture worker: frames -> fixed-duration segments
        let is_listening = Arc::clone(&self.is_listening);
        let segments_captured = Arc::clone(&self.segments_captured);
        let segment_secs = self.config.segment_secs;
        let sample_rate = self.config.sample_rate;

        let capture_task = tokio::spawn(async move {
            info!("Capture worker started");

            let mut frames_rx = frames_rx;
            let mut builder = SegmentBuilder::new(segment_secs, sample_rate);

            loop {
                if !is_listening.load(Ordering::SeqCst) {
                    break;
                }

                match timeout(FRAME_RECV_TIMEOUT, frames_rx.recv()).await {
                    Ok(Some(frame)) => {
                        if let Some(segment) = builder.push(frame) {
                            segments_captured.fetch_add(1, Ordering::SeqCst);
                            if segment_tx.send(segment).await.is_err() {
                                break;
                            }
                        }
                    }
                    Ok(None) => break,  // backend closed the stream
                    Err(_) => continue, // no frames yet; re-check the flag
                }
            }

            // Hand the partial window to the recognizer before shutting down
            if let Some(segment) = builder.flush() {
                segments_captured.fetch_add(1, Ordering::SeqCst);
                let _ = segment_tx.send(segment).await;
            }

            if let Err(e) = backend.stop().await {
                error!("Failed to stop audio backend: {}", e);
            }

            info!("Capture worker stopped");
        });

        // Transcription worker: segments -> transcript entries
        let transcriber = Arc::clone(&self.transcriber);
        let history = Arc::clone(&self.history);
        let store = self.store.clone();
        let session_id = self.config.session_id.clone();
        let min_text_chars = self.config.min_text_chars;
        let transcripts_recognized = Arc::clone(&self.transcripts_recognized);
        let transcript_event_tx = event_tx.clone();

        let transcribe_task = tokio::spawn(async move {
            info!("Transcription worker started");

            let mut segment_rx = segment_rx;

            while let Some(segment) = segment_rx.recv().await {
                let result = match transcriber.transcribe(&segment).await {
                    Ok(result) => result,
                    Err(e) => {
                        // Drop only this segment; the worker keeps going
                        error!("Transcription failed, dropping segment: {}", e);
                        continue;
                    }
                };

                let text = result.text.trim();
                if text.len() < min_text_chars {
                    continue;
                }

                let entry = TranscriptEntry {
                    confidence: result.confidence,
                    ..TranscriptEntry::new(session_id.clone(), SpeakerRole::Interviewer, text)
                };

                transcripts_recognized.fetch_add(1, Ordering::SeqCst);

                {
                    let mut history = history.lock().await;
                    history.push(entry.clone());
                }

                if let Some(store) = &store {
                    if let Err(e) = store.add_transcript(entry.clone()).await {
                        error!("Failed to persist transcript: {}", e);
                    }
                }

                if transcript_event_tx
                    .send(PipelineEvent::Transcript(entry.clone()))
                    .await
                    .is_err()
                {
                    break;
                }

                if entry_tx.send(entry).await.is_err() {
                    break;
                }
            }

            info!("Transcription worker stopped");
        });

        // Response worker: question-like entries -> answer suggestions
        let assistant = Arc::clone(&self.assistant);
        let history = Arc::clone(&self.history);
        let store = self.store.clone();
        let context_window = self.config.context_window;
        let answers_generated = Arc::clone(&self.answers_generated);

        let respond_task = tokio::spawn(async move {
            info!("Response worker started");

            let mut entry_rx = entry_rx;

            while let Some(entry) = entry_rx.recv().await {
                if !filter::is_question(&entry.text) {
                    continue;
                }

                let context = {
                    let history = history.lock().await;
                    history.recent(context_window)
                };

                let response_text = match assistant.generate(&context, &entry.text).await {
                    Ok(text) => text,
                    Err(e) => {
                        // The question still gets a visible record
                        error!("Answer generation failed: {}", e);
                        format!("Error generating response: {}", e)
                    }
                };

                let response =
                    AiResponse::new(entry.session_id.clone(), entry.text.clone(), response_text);
                answers_generated.fetch_add(1, Ordering::SeqCst);

                if let Some(store) = &store {
                    if let Err(e) = store.add_response(response.clone()).await {
                        error!("Failed to persist answer: {}", e);
                    }
                }

                if event_tx.send(PipelineEvent::Answer(response)).await.is_err() {
                    break;
                }
            }

            info!("Response worker stopped");
        });

        {
            let mut handle = self.capture_task.lock().await;
            *handle = Some(capture_task);
        }
        {
            let mut handle = self.transcribe_task.lock().await;
            *handle = Some(transcribe_task);
        }
        {
            let mut handle = self.respond_task.lock().await;
            *handle = Some(respond_task);
        }

        info!("Copilot session started");

        Ok(event_rx)
    }

    /// Stop listening and wait for the workers to drain.
    pub async fn stop(&self) -> Result<PipelineStats> {
        if !self.is_listening.load(Ordering::SeqCst) {
            warn!("Session not listening");
            return self.get_stats().await;
        }

        info!("Stopping copilot session: {}", self.config.session_id);

        // Signal the capture worker; the downstream channels close in turn
        self.is_listening.store(false, Ordering::SeqCst);

        let mut tasks = Vec::new();
        for slot in [&self.capture_task, &self.transcribe_task, &self.respond_task] {
            let mut handle = slot.lock().await;
            if let Some(task) = handle.take() {
                tasks.push(task);
            }
        }

        for result in futures::future::join_all(tasks).await {
            if let Err(e) = result {
                error!("Pipeline worker panicked: {}", e);
            }
        }

        info!("Copilot session stopped");

        self.get_stats().await
    }

    /// Get current session statistics
    pub async fn get_stats(&self) -> Result<PipelineStats> {
        let duration = Utc::now().signed_duration_since(self.started_at);

        Ok(PipelineStats {
            is_listening: self.is_listening.load(Ordering::SeqCst),
            started_at: self.started_at,
            duration_secs: duration.num_milliseconds() as f64 / 1000.0,
            segments_captured: self.segments_captured.load(Ordering::SeqCst),
            transcripts_recognized: self.transcripts_recognized.load(Ordering::SeqCst),
            answers_generated: self.answers_generated.load(Ordering::SeqCst),
        })
    }

    /// Snapshot of the rolling conversation history
    pub async fn history_snapshot(&self) -> Vec<TranscriptEntry> {
        let history = self.history.lock().await;
        history.snapshot()
    }

    pub fn session_id(&self) -> &str {
        &self.config.session_id
    }
}
