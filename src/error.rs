//! Error types for ipasay
//!
//! Every synthesis failure collapses into the single "Failed to play." alert
//! in the UI; the variants here carry the detail that ends up in the log.

use thiserror::Error;

/// Message shown to the user whenever playback cannot start.
pub const PLAYBACK_FAILED_MESSAGE: &str = "Failed to play.";

/// ipasay errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SayError {
    /// Connection, DNS, timeout or body read failure
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("Server responded with HTTP {0}")]
    HttpStatus(u16),

    /// The response body could not be decoded as audio
    #[error("Audio decode error: {0}")]
    Decode(String),

    /// Output device missing or refusing to play
    #[error("Audio device error: {0}")]
    AudioDevice(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system I/O error
    #[error("IO error: {0}")]
    IO(String),

    /// A synthesis request is already in flight
    #[error("A synthesis request is already in progress")]
    Busy,
}

impl From<std::io::Error> for SayError {
    fn from(e: std::io::Error) -> Self {
        SayError::IO(e.to_string())
    }
}

impl From<ureq::Error> for SayError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::StatusCode(code) => SayError::HttpStatus(code),
            other => SayError::Network(other.to_string()),
        }
    }
}

impl SayError {
    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            SayError::Network(_)
            | SayError::HttpStatus(_)
            | SayError::Decode(_)
            | SayError::AudioDevice(_) => PLAYBACK_FAILED_MESSAGE.to_string(),
            SayError::Config(_) => "Configuration error. Please check settings.".to_string(),
            SayError::IO(_) => "File system error occurred.".to_string(),
            SayError::Busy => "Please wait for the current request to finish.".to_string(),
        }
    }
}

/// Result type alias for ipasay operations
pub type Result<T> = std::result::Result<T, SayError>;
