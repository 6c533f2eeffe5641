//! Client configuration
//!
//! Every field has a default, so an empty TOML file (or no file at all) gives
//! a working client pointed at a local synthesis server.

use crate::error::{Result, SayError};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding [`ClientConfig::server_url`]
pub const SERVER_URL_ENV: &str = "IPASAY_SERVER_URL";

/// Configuration for the ipasay client
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the synthesis server, without a trailing path
    pub server_url: String,

    /// Whether the IPA keypad is shown in IPA mode
    pub keypad_enabled: bool,

    /// Global timeout for one synthesis request
    pub request_timeout_secs: u64,

    /// Largest response body accepted from the server
    pub max_response_bytes: u64,

    /// Longest decoded clip accepted from the server
    pub max_audio_secs: u64,

    /// Playback volume (0.0 to 1.0)
    pub volume: f32,

    /// Initial window size in points
    pub window_size: [f32; 2],
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".to_string(),
            keypad_enabled: true,
            request_timeout_secs: 30,
            max_response_bytes: 64 * 1024 * 1024,
            max_audio_secs: 300,
            volume: 0.8,
            window_size: [560.0, 320.0],
        }
    }
}

impl ClientConfig {
    /// Load a configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| SayError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    /// Parse and validate a configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ClientConfig =
            toml::from_str(content).map_err(|e| SayError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        match std::env::var(SERVER_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => self.with_server_url(url),
            _ => self,
        }
    }

    /// Set the server base URL
    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into();
        self
    }

    /// Disable the IPA keypad (minimal variant)
    pub fn without_keypad(mut self) -> Self {
        self.keypad_enabled = false;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn max_audio_duration(&self) -> Duration {
        Duration::from_secs(self.max_audio_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.server_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(SayError::Config(format!(
                "server_url must start with http:// or https://, got {:?}",
                self.server_url
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(SayError::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.max_response_bytes == 0 {
            return Err(SayError::Config(
                "max_response_bytes must be greater than zero".to_string(),
            ));
        }

        if self.max_audio_secs == 0 {
            return Err(SayError::Config(
                "max_audio_secs must be greater than zero".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.volume) {
            return Err(SayError::Config(format!(
                "volume must be between 0.0 and 1.0, got {}",
                self.volume
            )));
        }

        Ok(())
    }
}
