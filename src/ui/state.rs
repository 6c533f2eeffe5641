//! Application state management
//!
//! This module ties the controllers to the audio backend for the UI.

use crate::audio::{AudioLoader, AudioPlayer};
use crate::config::ClientConfig;
use crate::controller::{
    InputMode, InputModeController, KeypadButton, PhoneticKeypadController, SynthesisController,
    SynthesisOutcome, SynthesisPhase,
};
use crate::error::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

/// Central application state
pub struct AppState {
    /// Mode radios, text field and input enabled flags
    pub input: InputModeController,

    /// IPA keypad buttons
    pub keypad: PhoneticKeypadController,

    /// Request lifecycle and failure alert
    pub synthesis: SynthesisController,

    player: Box<dyn AudioPlayer>,
}

impl AppState {
    pub fn new(
        config: &ClientConfig,
        loader: Arc<dyn AudioLoader>,
        mut player: Box<dyn AudioPlayer>,
    ) -> Self {
        player.set_volume(config.volume);

        info!(keypad = config.keypad_enabled, "Application state created");

        Self {
            input: InputModeController::new(config.keypad_enabled),
            keypad: PhoneticKeypadController::new(),
            synthesis: SynthesisController::new(loader)
                .with_max_audio(config.max_audio_duration()),
            player,
        }
    }

    /// Select a mode through its labeled radio
    pub fn select_mode(&mut self, mode: InputMode) {
        self.input.select(mode);
    }

    /// Type a keypad symbol, returning the caret position at the end of text
    pub fn press_key(&mut self, button: KeypadButton) -> usize {
        self.keypad.press(button, &mut self.input)
    }

    /// Handle a click on the synthesize control
    pub fn synthesize(&mut self) -> Result<Uuid> {
        self.synthesis.synthesize(&mut self.input)
    }

    /// Process loader events and playback progress (once per frame)
    pub fn poll_events(&mut self) -> Option<SynthesisOutcome> {
        let outcome = self
            .synthesis
            .poll_events(&mut self.input, self.player.as_mut());
        self.synthesis.tick(self.player.as_ref());
        outcome
    }

    pub fn stop_playback(&mut self) {
        self.synthesis.stop_playback(self.player.as_mut());
    }

    pub fn dismiss_alert(&mut self) {
        self.synthesis.dismiss_alert();
    }

    /// Whether something is pending that needs continuous repaints
    pub fn is_busy(&self) -> bool {
        matches!(
            self.synthesis.phase(),
            SynthesisPhase::Requesting | SynthesisPhase::Playing
        )
    }

    pub fn can_synthesize(&self) -> bool {
        self.input.input_enabled() && !self.synthesis.is_in_flight()
    }

    /// Block up to `timeout` for the in-flight attempt to finish
    pub fn wait_events(&mut self, timeout: Duration) -> Option<SynthesisOutcome> {
        self.synthesis
            .wait_events(&mut self.input, self.player.as_mut(), timeout)
    }
}
