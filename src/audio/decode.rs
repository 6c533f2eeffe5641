use crate::error::{Result, SayError};
use rodio::Source;
use std::io::Cursor;
use std::time::Duration;

/// Decoded audio, ready to hand to a player
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedAudio {
    /// Interleaved samples in [-1.0, 1.0]
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl PreparedAudio {
    /// Longest clip accepted when no limit is configured
    pub const DEFAULT_MAX_DURATION: Duration = Duration::from_secs(300);

    /// Decode a complete audio file (WAV, MP3, FLAC or Vorbis)
    pub fn decode(bytes: Vec<u8>) -> Result<Self> {
        Self::decode_with_limit(bytes, Self::DEFAULT_MAX_DURATION)
    }

    /// Decode, rejecting streams that would play longer than `max_duration`
    ///
    /// A header can claim far more frames than the body holds, so the
    /// decoded sample count is capped as well as the declared duration.
    pub fn decode_with_limit(bytes: Vec<u8>, max_duration: Duration) -> Result<Self> {
        if bytes.is_empty() {
            return Err(SayError::Decode("empty response body".to_string()));
        }

        let decoder = rodio::Decoder::new(Cursor::new(bytes))
            .map_err(|e| SayError::Decode(e.to_string()))?;

        let sample_rate = decoder.sample_rate();
        let channels = decoder.channels();
        if sample_rate == 0 || channels == 0 {
            return Err(SayError::Decode(format!(
                "invalid stream format: {} Hz, {} channels",
                sample_rate, channels
            )));
        }

        if let Some(declared) = decoder.total_duration() {
            if declared > max_duration {
                return Err(SayError::Decode(format!(
                    "stream declares {:.1}s of audio, limit is {:.1}s",
                    declared.as_secs_f32(),
                    max_duration.as_secs_f32()
                )));
            }
        }

        let max_samples = (max_duration.as_secs_f64() * sample_rate as f64 * channels as f64)
            .ceil() as usize;
        let samples: Vec<f32> = decoder
            .convert_samples::<f32>()
            .take(max_samples.saturating_add(1))
            .collect();
        if samples.len() > max_samples {
            return Err(SayError::Decode(format!(
                "decoded audio exceeds {:.1}s",
                max_duration.as_secs_f32()
            )));
        }

        Ok(Self {
            samples,
            sample_rate,
            channels,
        })
    }

    pub fn duration_secs(&self) -> f32 {
        let frames = self.samples.len() / self.channels.max(1) as usize;
        frames as f32 / self.sample_rate.max(1) as f32
    }
}
