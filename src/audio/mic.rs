use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use super::backend::{AudioBackend, AudioBackendConfig, AudioFrame};

/// Wrapper for cpal::Stream to make it Send.
///
/// SAFETY: the stream is only touched while holding the Mutex below, so it
/// is never used from two threads at once.
struct SendableStream(cpal::Stream);

unsafe impl Send for SendableStream {}

/// Microphone capture via cpal.
///
/// Frames are assembled inside the input callback and pushed with
/// `try_send`; when the channel is full, audio is dropped (lossy).
pub struct MicrophoneBackend {
    config: AudioBackendConfig,
    stream: Mutex<Option<SendableStream>>,
    capturing: Arc<AtomicBool>,
}

impl MicrophoneBackend {
    pub fn new(config: AudioBackendConfig) -> Self {
        Self {
            config,
            stream: Mutex::new(None),
            capturing: Arc::new(AtomicBool::new(false)),
        }
    }
}

#[async_trait]
impl AudioBackend for MicrophoneBackend {
    async fn start(&mut self) -> Result<mpsc::Receiver<AudioFrame>> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| anyhow!("No input device available"))?;

        info!("Microphone device: {}", device.name().unwrap_or_default());

        let supported = select_input_config(&device, self.config.target_sample_rate)?;
        let sample_rate = supported.sample_rate().0;
        let channels = supported.channels();

        if sample_rate % self.config.target_sample_rate != 0 {
            warn!(
                "Capture rate {}Hz is not a multiple of target {}Hz; decimation will be approximate",
                sample_rate, self.config.target_sample_rate
            );
        }

        info!(
            "Capture config: {}Hz, {} channels, {:?}",
            sample_rate,
            channels,
            supported.sample_format()
        );

        let (tx, rx) = mpsc::channel(100);
        let frame_len =
            (sample_rate as u64 * channels as u64 * self.config.buffer_duration_ms / 1000) as usize;

        let err_fn = |err| error!("Audio stream error: {}", err);
        let stream_config = supported.config();

        let stream = match supported.sample_format() {
            cpal::SampleFormat::I16 => {
                let mut assembler = FrameAssembler::new(tx, frame_len, sample_rate, channels);
                device.build_input_stream(
                    &stream_config,
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        assembler.push(data);
                    },
                    err_fn,
                    None,
                )?
            }
            cpal::SampleFormat::F32 => {
                let mut assembler = FrameAssembler::new(tx, frame_len, sample_rate, channels);
                device.build_input_stream(
                    &stream_config,
                    move |data: &[f32], _: &cpal::InputCallbackInfo| {
                        let converted: Vec<i16> = data
                            .iter()
                            .map(|&s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
                            .collect();
                        assembler.push(&converted);
                    },
                    err_fn,
                    None,
                )?
            }
            fmt => return Err(anyhow!("Unsupported sample format: {:?}", fmt)),
        };

        stream.play().context("Failed to start audio stream")?;

        {
            let mut guard = self
                .stream
                .lock()
                .map_err(|_| anyhow!("Audio stream lock poisoned"))?;
            *guard = Some(SendableStream(stream));
        }

        self.capturing.store(true, Ordering::SeqCst);
        info!("Microphone capture started");

        Ok(rx)
    }

    async fn stop(&mut self) -> Result<()> {
        self.capturing.store(false, Ordering::SeqCst);

        let stream = {
            let mut guard = self
                .stream
                .lock()
                .map_err(|_| anyhow!("Audio stream lock poisoned"))?;
            guard.take()
        };

        if let Some(stream) = stream {
            stream
                .0
                .pause()
                .context("Failed to stop audio stream")?;
            // Dropping the stream releases the device
        }

        info!("Microphone capture stopped");
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.capturing.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "microphone"
    }
}

/// Pick an input config whose rate decimates cleanly to the target,
/// falling back to the device default.
fn select_input_config(
    device: &cpal::Device,
    target_rate: u32,
) -> Result<cpal::SupportedStreamConfig> {
    let preferred_rates = [target_rate, target_rate * 2, target_rate * 3];

    for &rate in &preferred_rates {
        let configs = device
            .supported_input_configs()
            .context("Failed to query input configs")?;
        for range in configs {
            if range.min_sample_rate().0 <= rate && range.max_sample_rate().0 >= rate {
                return Ok(range.with_sample_rate(cpal::SampleRate(rate)));
            }
        }
    }

    device
        .default_input_config()
        .context("Failed to query default input config")
}

/// Accumulates callback buffers into fixed-size frames.
struct FrameAssembler {
    tx: mpsc::Sender<AudioFrame>,
    pending: Vec<i16>,
    frame_len: usize,
    sample_rate: u32,
    channels: u16,
    samples_sent: u64,
}

impl FrameAssembler {
    fn new(tx: mpsc::Sender<AudioFrame>, frame_len: usize, sample_rate: u32, channels: u16) -> Self {
        Self {
            tx,
            pending: Vec::with_capacity(frame_len * 2),
            frame_len: frame_len.max(1),
            sample_rate,
            channels,
            samples_sent: 0,
        }
    }

    fn push(&mut self, data: &[i16]) {
        self.pending.extend_from_slice(data);

        while self.pending.len() >= self.frame_len {
            let samples: Vec<i16> = self.pending.drain(..self.frame_len).collect();
            let timestamp_ms =
                self.samples_sent * 1000 / (self.sample_rate as u64 * self.channels as u64);
            self.samples_sent += samples.len() as u64;

            let frame = AudioFrame {
                samples,
                sample_rate: self.sample_rate,
                channels: self.channels,
                timestamp_ms,
            };

            // The callback must not block; if the channel is full we drop
            // the frame (lossy)
            let _ = self.tx.try_send(frame);
        }
    }
}
