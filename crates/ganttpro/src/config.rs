//! Configuration for the GanttPro import service.

use std::env;
use std::time::Duration;

use crate::client::{DEFAULT_TIMEOUT_SECS, GANTTPRO_API_URL};
use crate::error::ImportError;

/// Import service configuration.
#[derive(Clone)]
pub struct Config {
    /// HTTP server port.
    pub port: u16,
    /// GanttPro API key.
    pub api_key: Option<String>,
    /// GanttPro API root.
    pub base_url: String,
    /// Timeout for each remote request.
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: env::var("GANTTPRO_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080),
            api_key: env::var("GANTTPRO_API_KEY")
                .ok()
                .filter(|s| !s.is_empty()),
            base_url: env::var("GANTTPRO_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| GANTTPRO_API_URL.to_string()),
            request_timeout_secs: env::var("GANTTPRO_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// The API key, or a configuration error if none is set.
    pub fn require_api_key(&self) -> Result<&str, ImportError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| ImportError::Configuration("API key not configured".to_string()))
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
