//! End-to-end tests for the synthesis flow
//!
//! The HTTP tests stand up a throwaway `tiny_http` server on a local port that
//! answers a single request, so the real `HttpLoader` is exercised without a
//! synthesis backend.

use ipasay::audio::{AudioLoader, HttpLoader, NullPlayer, PreparedAudio};
use ipasay::controller::{LoadEvent, SynthesisOutcome};
use ipasay::{
    request_path, ClientConfig, InputMode, InputModeController, PhoneticKeypadController, Result,
    SayError, SynthesisController, SynthesisPhase, SPECIAL_CHARACTERS,
};
use std::io::Cursor;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;
use tiny_http::{Header, Method, Response, Server};

const WAIT: Duration = Duration::from_secs(10);

/// Generate a short mono WAV clip
fn wav_bytes() -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 16000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for i in 0..1600 {
            let value = ((i as f32) * 0.05).sin() * 8000.0;
            writer.write_sample(value as i16).unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

/// Loader that records every requested path and answers with `response`
struct RecordingLoader {
    paths: Mutex<Vec<String>>,
    response: Result<Vec<u8>>,
}

impl RecordingLoader {
    fn new(response: Result<Vec<u8>>) -> Arc<Self> {
        Arc::new(Self {
            paths: Mutex::new(Vec::new()),
            response,
        })
    }

    fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl AudioLoader for RecordingLoader {
    fn load(&self, path: &str) -> Result<Vec<u8>> {
        self.paths.lock().unwrap().push(path.to_string());
        self.response.clone()
    }
}

/// Serve one HTTP request; returns the base URL and the requested URL
fn serve_once(status: u16, body: Vec<u8>) -> (String, JoinHandle<String>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let base_url = format!("http://{}", addr);

    let handle = std::thread::spawn(move || {
        let request = server.recv().unwrap();
        assert_eq!(request.method(), &Method::Get);
        let url = request.url().to_string();

        let content_type =
            Header::from_bytes(&b"Content-Type"[..], &b"audio/x-wav"[..]).unwrap();
        let response = Response::from_data(body)
            .with_status_code(status)
            .with_header(content_type);
        request.respond(response).unwrap();

        url
    });

    (base_url, handle)
}

#[test]
fn test_request_paths() {
    assert_eq!(request_path(InputMode::Text, "hello"), "/synthesize_text?text=hello");
    assert_eq!(request_path(InputMode::Text, "a&b"), "/synthesize_text?text=a%26b");
    assert_eq!(request_path(InputMode::Ipa, "ə"), "/synthesize_ipa?ipa=%C9%99");
}

#[test]
fn test_every_keypad_symbol_survives_encoding() {
    let keypad = PhoneticKeypadController::new();
    let mut input = InputModeController::new(true);
    input.select(InputMode::Ipa);

    for button in keypad.buttons() {
        keypad.press(*button, &mut input);
    }
    assert_eq!(input.current_text(), SPECIAL_CHARACTERS.concat());

    let path = request_path(input.current_mode(), input.current_text());
    assert!(path.starts_with("/synthesize_ipa?ipa="));
    assert!(path.is_ascii());

    let encoded = path.trim_start_matches("/synthesize_ipa?ipa=");
    assert_eq!(urlencoding::decode(encoded).unwrap(), SPECIAL_CHARACTERS.concat());
}

#[test]
fn test_successful_attempt_plays_once() {
    let loader = RecordingLoader::new(Ok(wav_bytes()));
    let mut controller = SynthesisController::new(loader.clone());
    let mut input = InputModeController::new(true);
    let mut player = NullPlayer::new();

    input.select(InputMode::Ipa);
    input.set_text("ə");
    controller.synthesize(&mut input).unwrap();
    assert!(!input.input_enabled());

    let outcome = controller.wait_events(&mut input, &mut player, WAIT);
    assert_eq!(outcome, Some(SynthesisOutcome::Playing));
    assert!(input.input_enabled());
    assert_eq!(player.plays(), 1);
    assert!(controller.alert().is_none());
    assert_eq!(loader.paths(), vec!["/synthesize_ipa?ipa=%C9%99".to_string()]);

    // Nothing else arrives for this attempt
    assert!(controller.poll_events(&mut input, &mut player).is_none());
    assert_eq!(player.plays(), 1);
}

#[test]
fn test_undecodable_body_fails() {
    let loader = RecordingLoader::new(Ok(b"not audio".to_vec()));
    let mut controller = SynthesisController::new(loader);
    let mut input = InputModeController::new(true);
    let mut player = NullPlayer::new();

    input.set_text("hello");
    controller.synthesize(&mut input).unwrap();

    let outcome = controller.wait_events(&mut input, &mut player, WAIT);
    assert!(matches!(
        outcome,
        Some(SynthesisOutcome::Failed(SayError::Decode(_)))
    ));
    assert!(input.input_enabled());
    assert_eq!(controller.alert(), Some("Failed to play."));
    assert_eq!(controller.phase(), SynthesisPhase::Failed);
    assert_eq!(player.plays(), 0);
}

#[test]
fn test_retry_after_failure_is_manual() {
    let loader = RecordingLoader::new(Err(SayError::HttpStatus(500)));
    let mut controller = SynthesisController::new(loader.clone());
    let mut input = InputModeController::new(true);
    let mut player = NullPlayer::new();

    input.set_text("again");
    controller.synthesize(&mut input).unwrap();
    controller.wait_events(&mut input, &mut player, WAIT);
    assert_eq!(loader.paths().len(), 1);

    controller.dismiss_alert();
    controller.synthesize(&mut input).unwrap();
    controller.wait_events(&mut input, &mut player, WAIT);
    assert_eq!(loader.paths().len(), 2);
    assert!(input.input_enabled());
}

#[test]
fn test_late_event_from_superseded_attempt_is_noop() {
    let loader = RecordingLoader::new(Err(SayError::Network("offline".into())));
    let mut controller = SynthesisController::new(loader);
    let mut input = InputModeController::new(true);
    let mut player = NullPlayer::new();

    let first = controller.synthesize(&mut input).unwrap();
    controller.wait_events(&mut input, &mut player, WAIT);
    controller.dismiss_alert();

    let audio = PreparedAudio::decode(wav_bytes()).unwrap();
    let late = controller.handle_event(
        LoadEvent::Ready { attempt: first, audio },
        &mut input,
        &mut player,
    );
    assert!(late.is_none());
    assert_eq!(player.plays(), 0);
    assert_eq!(controller.phase(), SynthesisPhase::Idle);
}

#[test]
fn test_http_loader_fetches_encoded_path() {
    let (base_url, server) = serve_once(200, wav_bytes());
    let config = ClientConfig::default().with_server_url(base_url);
    let loader = HttpLoader::new(&config);

    let bytes = loader.load(&request_path(InputMode::Text, "a&b")).unwrap();
    assert_eq!(bytes, wav_bytes());

    assert_eq!(server.join().unwrap(), "/synthesize_text?text=a%26b");
}

#[test]
fn test_http_error_status_is_reported() {
    let (base_url, server) = serve_once(500, b"boom".to_vec());
    let config = ClientConfig::default().with_server_url(base_url);
    let loader = HttpLoader::new(&config);

    let err = loader.load("/synthesize_text?text=x").unwrap_err();
    assert_eq!(err, SayError::HttpStatus(500));
    let _ = server.join();
}

#[test]
fn test_oversized_body_is_rejected() {
    let (base_url, server) = serve_once(200, vec![0u8; 4096]);
    let config = ClientConfig {
        max_response_bytes: 1024,
        ..ClientConfig::default().with_server_url(base_url)
    };
    let loader = HttpLoader::new(&config);

    let err = loader.load("/synthesize_text?text=x").unwrap_err();
    assert!(matches!(err, SayError::Network(_)));
    let _ = server.join();
}

#[test]
fn test_end_to_end_over_http() {
    let (base_url, server) = serve_once(200, wav_bytes());
    let config = ClientConfig::default().with_server_url(base_url);
    let mut controller = SynthesisController::new(Arc::new(HttpLoader::new(&config)));
    let mut input = InputModeController::new(true);
    let mut player = NullPlayer::new();

    input.set_text("hello");
    controller.synthesize(&mut input).unwrap();
    let outcome = controller.wait_events(&mut input, &mut player, WAIT);

    assert_eq!(outcome, Some(SynthesisOutcome::Playing));
    assert_eq!(player.plays(), 1);
    assert_eq!(server.join().unwrap(), "/synthesize_text?text=hello");
}
