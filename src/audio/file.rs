use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use hound::WavReader;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use super::backend::{AudioBackend, AudioBackendConfig, AudioFrame};

/// Capture backend that replays a WAV file as a frame stream.
///
/// Frames are emitted as fast as the bounded channel drains them; the
/// stream ends (channel closes) at end of file.
pub struct FileBackend {
    path: String,
    config: AudioBackendConfig,
    capturing: Arc<AtomicBool>,
    emit_task: Option<JoinHandle<()>>,
}

impl FileBackend {
    pub fn new(path: impl Into<String>, config: AudioBackendConfig) -> Self {
        Self {
            path: path.into(),
            config,
            capturing: Arc::new(AtomicBool::new(false)),
            emit_task: None,
        }
    }
}

#[async_trait]
impl AudioBackend for FileBackend {
    async fn start(&mut self) -> Result<mpsc::Receiver<AudioFrame>> {
        let reader = WavReader::open(&self.path)
            .with_context(|| format!("Failed to open WAV file: {}", self.path))?;

        let spec = reader.spec();
        let samples: Vec<i16> = reader
            .into_samples::<i16>()
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read audio samples")?;

        let duration_seconds =
            samples.len() as f64 / (spec.sample_rate as f64 * spec.channels as f64);

        info!(
            "Audio file loaded: {:.1}s, {}Hz, {} channels, {} samples",
            duration_seconds,
            spec.sample_rate,
            spec.channels,
            samples.len()
        );

        let frame_len = (spec.sample_rate as u64
            * spec.channels as u64
            * self.config.buffer_duration_ms
            / 1000)
            .max(1) as usize;

        let (tx, rx) = mpsc::channel(100);
        let capturing = Arc::clone(&self.capturing);
        capturing.store(true, Ordering::SeqCst);

        let sample_rate = spec.sample_rate;
        let channels = spec.channels;
        let buffer_duration_ms = self.config.buffer_duration_ms;

        let emit_task = tokio::spawn(async move {
            let mut timestamp_ms = 0u64;

            for chunk in samples.chunks(frame_len) {
                if !capturing.load(Ordering::SeqCst) {
                    break;
                }

                let frame = AudioFrame {
                    samples: chunk.to_vec(),
                    sample_rate,
                    channels,
                    timestamp_ms,
                };

                if tx.send(frame).await.is_err() {
                    break;
                }

                timestamp_ms += buffer_duration_ms;
            }

            capturing.store(false, Ordering::SeqCst);
        });

        self.emit_task = Some(emit_task);
        Ok(rx)
    }

    async fn stop(&mut self) -> Result<()> {
        self.capturing.store(false, Ordering::SeqCst);

        // The emit task owns no resources beyond the sample buffer, so
        // aborting it mid-send is safe
        if let Some(task) = self.emit_task.take() {
            task.abort();
        }

        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.capturing.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "file"
    }
}
