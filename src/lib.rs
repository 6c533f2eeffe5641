//! ipasay - front-end for a text-to-speech server
//!
//! Lets the user type plain text or an IPA transcription, insert IPA symbols
//! from an on-screen keypad, and play the audio synthesized by the server's
//! `/synthesize_text` and `/synthesize_ipa` endpoints.

pub mod audio;
pub mod config;
pub mod controller;
pub mod error;
pub mod ui;

pub use config::ClientConfig;
pub use controller::{
    request_path, InputMode, InputModeController, PhoneticKeypadController, SynthesisController,
    SynthesisPhase, SPECIAL_CHARACTERS,
};
pub use error::{Result, SayError, PLAYBACK_FAILED_MESSAGE};
