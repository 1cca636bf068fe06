use chrono::{DateTime, Utc};

use super::backend::AudioFrame;

/// One fixed-duration window of normalized audio, ready for the recognizer.
///
/// Samples are mono f32 in [-1.0, 1.0] at the builder's target rate.
#[derive(Debug, Clone)]
pub struct AudioSegment {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    /// Start time in milliseconds since capture started
    pub start_ms: u64,
    /// Timestamp of the last frame folded into this segment
    pub end_ms: u64,
    pub captured_at: DateTime<Utc>,
}

impl AudioSegment {
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Requantize to i16 little-endian PCM bytes for the STT wire format.
    pub fn to_pcm_bytes(&self) -> Vec<u8> {
        self.samples
            .iter()
            .flat_map(|&s| {
                let sample = (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
                sample.to_le_bytes()
            })
            .collect()
    }
}

/// Groups incoming audio frames into fixed-duration segments.
///
/// Frames are converted to mono, decimated to the target rate, and
/// normalized to f32 as they arrive. A frame whose timestamp crosses the
/// window boundary completes the current segment and opens the next one
/// (the triggering frame lands in the new segment).
pub struct SegmentBuilder {
    segment_duration_ms: u64,
    target_sample_rate: u32,
    current: Option<PendingSegment>,
}

struct PendingSegment {
    samples: Vec<f32>,
    start_ms: u64,
    end_ms: u64,
}

impl SegmentBuilder {
    pub fn new(segment_duration_secs: u64, target_sample_rate: u32) -> Self {
        Self {
            segment_duration_ms: segment_duration_secs * 1000,
            target_sample_rate,
            current: None,
        }
    }

    /// Fold one frame in. Returns the completed segment when this frame
    /// crossed the window boundary.
    pub fn push(&mut self, frame: AudioFrame) -> Option<AudioSegment> {
        let mut completed = None;

        if self.should_start_new_segment(&frame) {
            completed = self.take_current();
            self.current = Some(PendingSegment {
                samples: Vec::new(),
                start_ms: frame.timestamp_ms,
                end_ms: frame.timestamp_ms,
            });
        }

        let frame = downsample_frame(stereo_to_mono(frame), self.target_sample_rate);

        if let Some(current) = &mut self.current {
            current.end_ms = frame.timestamp_ms;
            current
                .samples
                .extend(frame.samples.iter().map(|&s| s as f32 / i16::MAX as f32));
        }

        completed
    }

    /// Complete the in-progress segment, if any. Called at end of capture.
    pub fn flush(&mut self) -> Option<AudioSegment> {
        self.take_current()
    }

    fn should_start_new_segment(&self, frame: &AudioFrame) -> bool {
        match &self.current {
            None => true,
            Some(current) => {
                let elapsed_ms = frame.timestamp_ms.saturating_sub(current.start_ms);
                elapsed_ms >= self.segment_duration_ms
            }
        }
    }

    fn take_current(&mut self) -> Option<AudioSegment> {
        self.current.take().map(|pending| AudioSegment {
            samples: pending.samples,
            sample_rate: self.target_sample_rate,
            start_ms: pending.start_ms,
            end_ms: pending.end_ms,
            captured_at: Utc::now(),
        })
    }
}

/// Convert stereo to mono by summing channels
pub fn stereo_to_mono(frame: AudioFrame) -> AudioFrame {
    if frame.channels == 1 {
        return frame;
    }

    if frame.channels != 2 {
        return frame; // Only support stereo -> mono
    }

    let mut mono_samples = Vec::with_capacity(frame.samples.len() / 2);

    // Sum left and right channels (no division to preserve volume)
    for chunk in frame.samples.chunks_exact(2) {
        let left = chunk[0] as i32;
        let right = chunk[1] as i32;
        let sum = left + right;
        let mono = sum.clamp(i16::MIN as i32, i16::MAX as i32) as i16;
        mono_samples.push(mono);
    }

    AudioFrame {
        samples: mono_samples,
        sample_rate: frame.sample_rate,
        channels: 1,
        timestamp_ms: frame.timestamp_ms,
    }
}

/// Downsample audio frame by decimation
pub fn downsample_frame(frame: AudioFrame, target_rate: u32) -> AudioFrame {
    if frame.sample_rate == target_rate {
        return frame;
    }

    let ratio = frame.sample_rate / target_rate;
    if ratio <= 1 {
        return frame; // Can't upsample
    }

    // Decimate: take every Nth sample
    let downsampled: Vec<i16> = frame
        .samples
        .iter()
        .step_by(ratio as usize)
        .copied()
        .collect();

    AudioFrame {
        samples: downsampled,
        sample_rate: target_rate,
        channels: frame.channels,
        timestamp_ms: frame.timestamp_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(samples: Vec<i16>, sample_rate: u32, channels: u16, timestamp_ms: u64) -> AudioFrame {
        AudioFrame {
            samples,
            sample_rate,
            channels,
            timestamp_ms,
        }
    }

    #[test]
    fn test_stereo_to_mono_sums_channels() {
        let mono = stereo_to_mono(frame(vec![1000, 2000, -500, 500], 16000, 2, 0));
        assert_eq!(mono.channels, 1);
        assert_eq!(mono.samples, vec![3000, 0]);
    }

    #[test]
    fn test_stereo_to_mono_clamps_on_overflow() {
        let mono = stereo_to_mono(frame(vec![i16::MAX, i16::MAX, i16::MIN, i16::MIN], 16000, 2, 0));
        assert_eq!(mono.samples, vec![i16::MAX, i16::MIN]);
    }

    #[test]
    fn test_downsample_takes_every_nth_sample() {
        let input = frame((0..12).collect(), 48000, 1, 0);
        let out = downsample_frame(input, 16000);
        assert_eq!(out.sample_rate, 16000);
        assert_eq!(out.samples, vec![0, 3, 6, 9]);
    }

    #[test]
    fn test_downsample_never_upsamples() {
        let input = frame(vec![1, 2, 3], 16000, 1, 0);
        let out = downsample_frame(input, 48000);
        assert_eq!(out.sample_rate, 16000);
        assert_eq!(out.samples, vec![1, 2, 3]);
    }

    #[test]
    fn test_builder_emits_segment_at_window_boundary() {
        let mut builder = SegmentBuilder::new(2, 16000);

        // 100ms frames of 16kHz mono: 1600 samples each
        for i in 0..20 {
            let completed = builder.push(frame(vec![0i16; 1600], 16000, 1, i * 100));
            assert!(completed.is_none(), "no segment before the boundary");
        }

        // Frame at 2000ms crosses the 2s boundary
        let completed = builder.push(frame(vec![0i16; 1600], 16000, 1, 2000));
        let segment = completed.unwrap();
        assert_eq!(segment.start_ms, 0);
        assert_eq!(segment.end_ms, 1900);
        assert_eq!(segment.samples.len(), 20 * 1600);
        assert!((segment.duration_seconds() - 2.0).abs() < 0.01);
    }

    #[test]
    fn test_builder_flush_returns_partial_segment() {
        let mut builder = SegmentBuilder::new(2, 16000);
        for i in 0..5 {
            builder.push(frame(vec![0i16; 1600], 16000, 1, i * 100));
        }

        let segment = builder.flush().unwrap();
        assert_eq!(segment.start_ms, 0);
        assert_eq!(segment.end_ms, 400);
        assert_eq!(segment.samples.len(), 5 * 1600);
        assert!(builder.flush().is_none());
    }

    #[test]
    fn test_builder_normalizes_and_converts() {
        let mut builder = SegmentBuilder::new(1, 16000);
        // Stereo 48kHz frame: mono conversion halves it, decimation takes a third
        builder.push(frame(vec![i16::MAX / 2; 1200], 48000, 2, 0));

        let segment = builder.flush().unwrap();
        assert_eq!(segment.sample_rate, 16000);
        assert_eq!(segment.samples.len(), 200);
        // Summed stereo pairs land near full scale
        assert!(segment.samples.iter().all(|&s| (s - 1.0).abs() < 0.01));
    }

    #[test]
    fn test_pcm_bytes_are_little_endian_i16() {
        let segment = AudioSegment {
            samples: vec![0.0, 0.5, -1.0],
            sample_rate: 16000,
            start_ms: 0,
            end_ms: 0,
            captured_at: Utc::now(),
        };

        let bytes = segment.to_pcm_bytes();
        assert_eq!(bytes.len(), 6);
        assert_eq!(&bytes[0..2], &0i16.to_le_bytes());
        assert_eq!(&bytes[2..4], &16383i16.to_le_bytes());
        assert_eq!(&bytes[4..6], &(-i16::MAX).to_le_bytes());
    }
}
