use thiserror::Error;

/// Unified error type for the entire portfolio-tracker-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Transport ───────────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Malformed response from {endpoint}: {message}")]
    MalformedResponse { endpoint: String, message: String },

    #[error("Invalid price for {symbol}: {price} (must be finite and non-negative)")]
    InvalidPrice { symbol: String, price: f64 },

    // ── Local decode ────────────────────────────────────────────────
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Client state ────────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Asset not found: {0}")]
    AssetNotFound(i64),

    #[error("Portfolio has not been loaded yet")]
    NotLoaded,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// `true` for failures that came from talking to the backend
    /// (as opposed to local validation or state errors).
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            CoreError::Network(_)
                | CoreError::HttpStatus { .. }
                | CoreError::MalformedResponse { .. }
                | CoreError::InvalidPrice { .. }
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors carry the full URL; drop the query string.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
