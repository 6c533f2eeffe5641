//! Audio playback
//!
//! `RodioPlayer` drives the default output device. `NullPlayer` stands in when
//! no device is available so the rest of the UI keeps working.

use super::PreparedAudio;
use crate::error::{Result, SayError};
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, info, warn};

/// Something that can play decoded audio
pub trait AudioPlayer {
    /// Start playing `audio`, replacing whatever is playing
    fn play(&mut self, audio: PreparedAudio) -> Result<()>;

    /// Stop playback immediately
    fn stop(&mut self);

    /// Check if audio is still playing
    fn is_playing(&self) -> bool;

    /// Set volume (0.0 to 1.0)
    fn set_volume(&mut self, volume: f32);
}

/// Plays audio on the default output device
pub struct RodioPlayer {
    // Dropping the stream silences every sink attached to it
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
    volume: f32,
}

impl RodioPlayer {
    /// Open the default output device
    pub fn new(volume: f32) -> Result<Self> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| SayError::AudioDevice(format!("No output device available: {}", e)))?;

        info!("Audio output opened");

        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
            volume: volume.clamp(0.0, 1.0),
        })
    }
}

impl AudioPlayer for RodioPlayer {
    fn play(&mut self, audio: PreparedAudio) -> Result<()> {
        self.stop();

        let sink = Sink::try_new(&self.handle)
            .map_err(|e| SayError::AudioDevice(format!("Failed to create sink: {}", e)))?;
        sink.set_volume(self.volume);

        let duration = audio.duration_secs();
        sink.append(SamplesBuffer::new(
            audio.channels,
            audio.sample_rate,
            audio.samples,
        ));
        sink.play();

        info!("Playing {:.2}s of audio", duration);
        self.sink = Some(sink);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
            debug!("Playback stopped");
        }
    }

    fn is_playing(&self) -> bool {
        self.sink.as_ref().is_some_and(|sink| !sink.empty())
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(sink) = &self.sink {
            sink.set_volume(self.volume);
        }
    }
}

/// Accepts audio without an output device
#[derive(Debug, Default)]
pub struct NullPlayer {
    plays: usize,
}

impl NullPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of clips handed to this player
    pub fn plays(&self) -> usize {
        self.plays
    }
}

impl AudioPlayer for NullPlayer {
    fn play(&mut self, audio: PreparedAudio) -> Result<()> {
        warn!(
            "No audio device, discarding {:.2}s of audio",
            audio.duration_secs()
        );
        self.plays += 1;
        Ok(())
    }

    fn stop(&mut self) {}

    fn is_playing(&self) -> bool {
        false
    }

    fn set_volume(&mut self, _volume: f32) {}
}

/// Open the default device, falling back to [`NullPlayer`]
pub fn open_default_player(volume: f32) -> Box<dyn AudioPlayer> {
    match RodioPlayer::new(volume) {
        Ok(player) => Box::new(player),
        Err(e) => {
            warn!("[AUDIO] {}; playback disabled", e);
            Box::new(NullPlayer::new())
        }
    }
}
