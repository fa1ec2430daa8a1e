use thiserror::Error;

/// Top-level error type for the `hearthbeat-api` crate.
///
/// Covers every failure mode across both API surfaces: authentication,
/// transport, the REST API, and the WebSocket command API.
/// `hearthbeat-core` maps these into domain-appropriate variants.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Token rejected by the hub (HTTP 401 or `auth_invalid`).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── REST API ────────────────────────────────────────────────────
    /// Non-success HTTP response from the hub.
    #[error("Hub API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── WebSocket ───────────────────────────────────────────────────
    /// WebSocket connection or protocol failure.
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// A registry command was rejected by the hub.
    #[error("Registry command failed: {message}")]
    Registry { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error indicates the token was rejected.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a transient error worth retrying
    /// on the next poll tick.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } | Self::WebSocket(_) => true,
            _ => false,
        }
    }
}
