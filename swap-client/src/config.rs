//! Client configuration

use std::path::PathBuf;

/// Default request ceiling in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client configuration for connecting to the marketplace API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Request timeout in seconds; exceeding it is a transport failure
    pub timeout: u64,

    /// Directory holding the persisted session entries.
    /// `None` disables persistence (ephemeral session).
    pub data_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Create a new configuration with the default timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT_SECS,
            data_dir: None,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the session data directory
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
