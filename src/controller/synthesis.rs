//! Synthesis request lifecycle
//!
//! One attempt at a time: `Idle → Requesting → {Playing | Failed} → Idle`.
//! Loading and decoding happen on a worker thread that reports back through a
//! channel; the UI thread drains it with [`SynthesisController::poll_events`].

use super::input_mode::{InputMode, InputModeController};
use crate::audio::{AudioLoader, AudioPlayer, PreparedAudio};
use crate::error::{Result, SayError};
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Build the request path for a mode and text
///
/// The text is percent-encoded as UTF-8, so `ə` becomes `%C9%99`. Only
/// `A-Z a-z 0-9 - . _ ~` stay literal; `!'()*` are escaped too, which the
/// server decodes the same way.
pub fn request_path(mode: InputMode, text: &str) -> String {
    let name = mode.as_str();
    format!("/synthesize_{}?{}={}", name, name, urlencoding::encode(text))
}

/// Where the current attempt stands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SynthesisPhase {
    #[default]
    Idle,
    /// Waiting for the audio to load
    Requesting,
    Playing,
    /// The last attempt failed and the alert is showing
    Failed,
}

impl std::fmt::Display for SynthesisPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SynthesisPhase::Idle => write!(f, "Ready"),
            SynthesisPhase::Requesting => write!(f, "Synthesizing..."),
            SynthesisPhase::Playing => write!(f, "Playing"),
            SynthesisPhase::Failed => write!(f, "Failed"),
        }
    }
}

/// Terminal event for one attempt, posted by the loader thread
#[derive(Debug, Clone)]
pub enum LoadEvent {
    /// Audio fetched and decoded
    Ready { attempt: Uuid, audio: PreparedAudio },
    /// Fetch or decode failed
    Failed { attempt: Uuid, error: SayError },
}

impl LoadEvent {
    pub fn attempt(&self) -> Uuid {
        match self {
            LoadEvent::Ready { attempt, .. } | LoadEvent::Failed { attempt, .. } => *attempt,
        }
    }
}

/// How an attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisOutcome {
    Playing,
    Failed(SayError),
}

type Waker = Arc<dyn Fn() + Send + Sync>;

/// Runs synthesize clicks through load, playback and error reporting
pub struct SynthesisController {
    loader: Arc<dyn AudioLoader>,
    max_audio: Duration,
    event_tx: Sender<LoadEvent>,
    event_rx: Receiver<LoadEvent>,
    waker: Option<Waker>,
    in_flight: Option<Uuid>,
    phase: SynthesisPhase,
    alert: Option<String>,
    last_path: Option<String>,
    requested_at: Option<Instant>,
}

impl SynthesisController {
    pub fn new(loader: Arc<dyn AudioLoader>) -> Self {
        let (event_tx, event_rx) = unbounded();
        Self {
            loader,
            max_audio: PreparedAudio::DEFAULT_MAX_DURATION,
            event_tx,
            event_rx,
            waker: None,
            in_flight: None,
            phase: SynthesisPhase::Idle,
            alert: None,
            last_path: None,
            requested_at: None,
        }
    }

    /// Longest clip accepted from the server
    pub fn with_max_audio(mut self, max_audio: Duration) -> Self {
        self.max_audio = max_audio;
        self
    }

    /// Called from the loader thread after posting an event (e.g. to repaint)
    pub fn set_waker(&mut self, waker: impl Fn() + Send + Sync + 'static) {
        self.waker = Some(Arc::new(waker));
    }

    pub fn phase(&self) -> SynthesisPhase {
        self.phase
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Alert text waiting to be acknowledged
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn last_path(&self) -> Option<&str> {
        self.last_path.as_deref()
    }

    /// Start a synthesis attempt for the current mode and text
    ///
    /// Rejected with [`SayError::Busy`] while another attempt is in flight,
    /// whatever the enabled state of the widgets.
    pub fn synthesize(&mut self, input: &mut InputModeController) -> Result<Uuid> {
        if let Some(current) = self.in_flight {
            warn!(%current, "Synthesis already in progress, ignoring request");
            return Err(SayError::Busy);
        }

        input.disable_input();

        let mode = input.current_mode();
        let path = request_path(mode, input.current_text());
        let attempt = Uuid::new_v4();

        info!(%attempt, %mode, "Requesting {}", path);

        self.in_flight = Some(attempt);
        self.phase = SynthesisPhase::Requesting;
        self.alert = None;
        self.last_path = Some(path.clone());
        self.requested_at = Some(Instant::now());

        self.spawn_load(attempt, path);
        Ok(attempt)
    }

    fn spawn_load(&self, attempt: Uuid, path: String) {
        let loader = Arc::clone(&self.loader);
        let tx = self.event_tx.clone();
        let waker = self.waker.clone();
        let max_audio = self.max_audio;

        let spawned = std::thread::Builder::new()
            .name("synthesis-load".to_string())
            .spawn(move || {
                let loaded = panic::catch_unwind(AssertUnwindSafe(|| {
                    loader
                        .load(&path)
                        .and_then(|bytes| PreparedAudio::decode_with_limit(bytes, max_audio))
                }));
                let event = match loaded {
                    Ok(Ok(audio)) => LoadEvent::Ready { attempt, audio },
                    Ok(Err(error)) => LoadEvent::Failed { attempt, error },
                    Err(payload) => {
                        let reason = panic_reason(payload.as_ref());
                        error!(%attempt, "Loader panicked: {}", reason);
                        LoadEvent::Failed {
                            attempt,
                            error: SayError::Decode(format!("loader panicked: {}", reason)),
                        }
                    }
                };
                // The controller may be gone; nobody is left to notify then
                if tx.send(event).is_ok() {
                    if let Some(wake) = waker {
                        wake();
                    }
                }
            });

        if let Err(e) = spawned {
            error!(%attempt, "Failed to spawn loader thread: {}", e);
            let _ = self.event_tx.send(LoadEvent::Failed {
                attempt,
                error: SayError::IO(e.to_string()),
            });
        }
    }

    /// Drain loader events; returns the outcome if the attempt finished
    pub fn poll_events(
        &mut self,
        input: &mut InputModeController,
        player: &mut dyn AudioPlayer,
    ) -> Option<SynthesisOutcome> {
        let mut outcome = None;
        while let Ok(event) = self.event_rx.try_recv() {
            if let Some(finished) = self.handle_event(event, input, player) {
                outcome = Some(finished);
            }
        }
        outcome
    }

    /// Like [`poll_events`](Self::poll_events), but waits up to `timeout` for
    /// the first event
    pub fn wait_events(
        &mut self,
        input: &mut InputModeController,
        player: &mut dyn AudioPlayer,
        timeout: Duration,
    ) -> Option<SynthesisOutcome> {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => {
                let first = self.handle_event(event, input, player);
                self.poll_events(input, player).or(first)
            }
            Err(RecvTimeoutError::Timeout) => None,
            // Unreachable while self holds a sender
            Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Apply one loader event
    ///
    /// Only the event of the in-flight attempt counts. Anything else is a
    /// late callback and changes nothing, so input is re-enabled exactly once
    /// per attempt.
    pub fn handle_event(
        &mut self,
        event: LoadEvent,
        input: &mut InputModeController,
        player: &mut dyn AudioPlayer,
    ) -> Option<SynthesisOutcome> {
        let attempt = event.attempt();
        if self.in_flight != Some(attempt) {
            debug!(%attempt, "Ignoring event for stale attempt");
            return None;
        }

        self.in_flight = None;
        let elapsed_ms = self
            .requested_at
            .take()
            .map(|t| t.elapsed().as_millis() as u64)
            .unwrap_or_default();

        input.enable_input();

        let result = match event {
            LoadEvent::Ready { audio, .. } => {
                info!(%attempt, elapsed_ms, "Audio ready ({:.2}s)", audio.duration_secs());
                player.play(audio)
            }
            LoadEvent::Failed { error, .. } => Err(error),
        };

        match result {
            Ok(()) => {
                self.phase = SynthesisPhase::Playing;
                Some(SynthesisOutcome::Playing)
            }
            Err(error) => {
                error!(%attempt, elapsed_ms, "Playback failed: {}", error);
                self.phase = SynthesisPhase::Failed;
                self.alert = Some(error.user_message());
                Some(SynthesisOutcome::Failed(error))
            }
        }
    }

    /// Return to idle once playback drains on its own
    pub fn tick(&mut self, player: &dyn AudioPlayer) {
        if self.phase == SynthesisPhase::Playing && !player.is_playing() {
            debug!("Playback finished");
            self.phase = SynthesisPhase::Idle;
        }
    }

    pub fn stop_playback(&mut self, player: &mut dyn AudioPlayer) {
        player.stop();
        if self.phase == SynthesisPhase::Playing {
            self.phase = SynthesisPhase::Idle;
        }
    }

    /// Acknowledge the failure alert
    pub fn dismiss_alert(&mut self) {
        if self.alert.take().is_some() && self.phase == SynthesisPhase::Failed {
            self.phase = SynthesisPhase::Idle;
        }
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullPlayer;

    fn failing_loader() -> Arc<dyn AudioLoader> {
        Arc::new(|_: &str| -> Result<Vec<u8>> { Err(SayError::HttpStatus(500)) })
    }

    fn silence() -> PreparedAudio {
        PreparedAudio {
            samples: vec![0.0; 160],
            sample_rate: 16000,
            channels: 1,
        }
    }

    #[test]
    fn test_request_path_plain_text() {
        assert_eq!(
            request_path(InputMode::Text, "hello"),
            "/synthesize_text?text=hello"
        );
    }

    #[test]
    fn test_request_path_reserved_characters() {
        assert_eq!(
            request_path(InputMode::Text, "a&b"),
            "/synthesize_text?text=a%26b"
        );
        assert_eq!(
            request_path(InputMode::Text, "hi there?"),
            "/synthesize_text?text=hi%20there%3F"
        );
        // Sub-delimiters are escaped as well
        assert_eq!(
            request_path(InputMode::Text, "hi!(x)*'"),
            "/synthesize_text?text=hi%21%28x%29%2A%27"
        );
    }

    #[test]
    fn test_request_path_ipa_is_utf8_encoded() {
        assert_eq!(request_path(InputMode::Ipa, "ə"), "/synthesize_ipa?ipa=%C9%99");
    }

    #[test]
    fn test_request_path_empty_text() {
        assert_eq!(request_path(InputMode::Ipa, ""), "/synthesize_ipa?ipa=");
    }

    #[test]
    fn test_synthesize_disables_input_and_guards() {
        let mut controller = SynthesisController::new(failing_loader());
        let mut input = InputModeController::new(true);
        input.set_text("hello");

        controller.synthesize(&mut input).unwrap();
        assert!(!input.input_enabled());
        assert!(controller.is_in_flight());
        assert_eq!(controller.phase(), SynthesisPhase::Requesting);
        assert_eq!(controller.last_path(), Some("/synthesize_text?text=hello"));

        // Bypassing the disabled widgets still cannot start a second attempt
        input.enable_input();
        assert_eq!(controller.synthesize(&mut input), Err(SayError::Busy));
    }

    #[test]
    fn test_ready_event_enables_then_plays() {
        let mut controller = SynthesisController::new(failing_loader());
        let mut input = InputModeController::new(true);
        let mut player = NullPlayer::new();

        let attempt = controller.synthesize(&mut input).unwrap();
        let outcome = controller.handle_event(
            LoadEvent::Ready { attempt, audio: silence() },
            &mut input,
            &mut player,
        );

        assert_eq!(outcome, Some(SynthesisOutcome::Playing));
        assert!(input.input_enabled());
        assert_eq!(player.plays(), 1);
        assert_eq!(controller.phase(), SynthesisPhase::Playing);
        assert!(controller.alert().is_none());
    }

    #[test]
    fn test_failed_event_alerts() {
        let mut controller = SynthesisController::new(failing_loader());
        let mut input = InputModeController::new(true);
        let mut player = NullPlayer::new();

        let attempt = controller.synthesize(&mut input).unwrap();
        let outcome = controller.handle_event(
            LoadEvent::Failed { attempt, error: SayError::Network("refused".into()) },
            &mut input,
            &mut player,
        );

        assert_eq!(
            outcome,
            Some(SynthesisOutcome::Failed(SayError::Network("refused".into())))
        );
        assert!(input.input_enabled());
        assert_eq!(controller.alert(), Some("Failed to play."));
        assert_eq!(controller.phase(), SynthesisPhase::Failed);
        assert_eq!(player.plays(), 0);

        controller.dismiss_alert();
        assert!(controller.alert().is_none());
        assert_eq!(controller.phase(), SynthesisPhase::Idle);
    }

    #[test]
    fn test_second_terminal_event_is_ignored() {
        let mut controller = SynthesisController::new(failing_loader());
        let mut input = InputModeController::new(true);
        let mut player = NullPlayer::new();

        let attempt = controller.synthesize(&mut input).unwrap();
        let first = controller.handle_event(
            LoadEvent::Ready { attempt, audio: silence() },
            &mut input,
            &mut player,
        );
        assert!(first.is_some());

        // Late error for the same attempt must neither alert nor toggle input
        input.disable_input();
        let late = controller.handle_event(
            LoadEvent::Failed { attempt, error: SayError::Decode("late".into()) },
            &mut input,
            &mut player,
        );
        assert!(late.is_none());
        assert!(!input.input_enabled());
        assert!(controller.alert().is_none());
    }

    #[test]
    fn test_stale_attempt_is_ignored() {
        let mut controller = SynthesisController::new(failing_loader());
        let mut input = InputModeController::new(true);
        let mut player = NullPlayer::new();

        controller.synthesize(&mut input).unwrap();
        let outcome = controller.handle_event(
            LoadEvent::Ready { attempt: Uuid::new_v4(), audio: silence() },
            &mut input,
            &mut player,
        );

        assert!(outcome.is_none());
        assert!(!input.input_enabled());
        assert!(controller.is_in_flight());
    }

    #[test]
    fn test_worker_reports_failure() {
        let mut controller = SynthesisController::new(failing_loader());
        let mut input = InputModeController::new(true);
        let mut player = NullPlayer::new();

        controller.synthesize(&mut input).unwrap();
        let outcome = controller.wait_events(&mut input, &mut player, Duration::from_secs(5));

        assert_eq!(outcome, Some(SynthesisOutcome::Failed(SayError::HttpStatus(500))));
        assert!(input.input_enabled());
        assert!(!controller.is_in_flight());
    }

    #[test]
    fn test_panicking_loader_still_reenables_input() {
        let loader: Arc<dyn AudioLoader> =
            Arc::new(|_: &str| -> Result<Vec<u8>> { panic!("decoder blew up") });
        let mut controller = SynthesisController::new(loader);
        let mut input = InputModeController::new(true);
        let mut player = NullPlayer::new();

        controller.synthesize(&mut input).unwrap();
        let outcome = controller.wait_events(&mut input, &mut player, Duration::from_secs(5));

        match outcome {
            Some(SynthesisOutcome::Failed(SayError::Decode(reason))) => {
                assert!(reason.contains("decoder blew up"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(input.input_enabled());
        assert!(!controller.is_in_flight());
        assert_eq!(controller.alert(), Some("Failed to play."));

        controller.dismiss_alert();
        assert!(controller.synthesize(&mut input).is_ok());
    }

    #[test]
    fn test_playing_returns_to_idle_when_drained() {
        let mut controller = SynthesisController::new(failing_loader());
        let mut input = InputModeController::new(true);
        let mut player = NullPlayer::new();

        let attempt = controller.synthesize(&mut input).unwrap();
        controller.handle_event(
            LoadEvent::Ready { attempt, audio: silence() },
            &mut input,
            &mut player,
        );
        assert_eq!(controller.phase(), SynthesisPhase::Playing);

        controller.tick(&player);
        assert_eq!(controller.phase(), SynthesisPhase::Idle);
    }
}
