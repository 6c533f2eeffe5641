//! Fetching synthesized audio from the server

use crate::config::ClientConfig;
use crate::error::{Result, SayError};
use std::io::Read;
use tracing::{debug, info};

/// Source of encoded audio for a request path
///
/// Called from a worker thread, never from the UI thread.
pub trait AudioLoader: Send + Sync {
    /// Fetch the resource at `path` (e.g. `/synthesize_text?text=hi`)
    fn load(&self, path: &str) -> Result<Vec<u8>>;
}

impl<F> AudioLoader for F
where
    F: Fn(&str) -> Result<Vec<u8>> + Send + Sync,
{
    fn load(&self, path: &str) -> Result<Vec<u8>> {
        self(path)
    }
}

/// Loads audio over HTTP from the synthesis server
#[derive(Clone)]
pub struct HttpLoader {
    agent: ureq::Agent,
    base_url: String,
    max_bytes: u64,
}

impl HttpLoader {
    pub fn new(config: &ClientConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(config.request_timeout()))
            .build()
            .into();

        info!(
            "HTTP loader targeting {} (timeout {}s)",
            config.server_url, config.request_timeout_secs
        );

        Self {
            agent,
            base_url: config.server_url.trim().trim_end_matches('/').to_string(),
            max_bytes: config.max_response_bytes,
        }
    }

    /// Absolute URL for a request path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl AudioLoader for HttpLoader {
    fn load(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.url_for(path);
        debug!("GET {}", url);

        let response = self.agent.get(&url).call()?;

        let mut bytes = Vec::new();
        response
            .into_body()
            .into_reader()
            .take(self.max_bytes + 1)
            .read_to_end(&mut bytes)
            .map_err(|e| SayError::Network(format!("Failed to read response body: {}", e)))?;

        if bytes.len() as u64 > self.max_bytes {
            return Err(SayError::Network(format!(
                "Response body exceeds {} bytes",
                self.max_bytes
            )));
        }

        debug!("Received {} bytes from {}", bytes.len(), url);
        Ok(bytes)
    }
}
