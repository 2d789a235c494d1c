use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::CoreError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Backend root, e.g. "http://localhost:8000". The `/api/...` paths are
    /// appended to it.
    pub base_url: String,

    /// How often the portfolio snapshot is reloaded in the background.
    pub refresh_interval: Duration,

    /// Per-request transport timeout.
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.base_url.trim().is_empty() {
            return Err(CoreError::Config("base_url must not be empty".into()));
        }
        if self.refresh_interval.is_zero() {
            return Err(CoreError::Config(
                "refresh_interval must be greater than zero".into(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(CoreError::Config(
                "request_timeout must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
