// ── Core error types ──
//
// User-facing errors from hearthbeat-core. These are NOT API-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<hearthbeat_api::Error>` impl translates transport-layer
// errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach hub at {url}: {reason}")]
    HubUnreachable { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Refresh timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("Hub API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<hearthbeat_api::Error> for CoreError {
    fn from(err: hearthbeat_api::Error) -> Self {
        match err {
            hearthbeat_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            hearthbeat_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::HubUnreachable {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            hearthbeat_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            hearthbeat_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            hearthbeat_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            hearthbeat_api::Error::WebSocket(reason) => CoreError::HubUnreachable {
                url: String::new(),
                reason: format!("WebSocket error: {reason}"),
            },
            hearthbeat_api::Error::Registry { message } => CoreError::Api {
                message,
                status: None,
            },
            hearthbeat_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
