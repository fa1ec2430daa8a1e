//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use hearthbeat_config::ConfigError;
use hearthbeat_core::CoreError;

/// Exit codes per the CLI contract.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the hub at {url}")]
    #[diagnostic(
        code(hearthbeat::connection_failed),
        help(
            "Check that Home Assistant is running and accessible.\n\
             URL: {url}\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(hearthbeat::timeout),
        help("Increase timeout with --timeout or check hub responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed")]
    #[diagnostic(
        code(hearthbeat::auth_failed),
        help(
            "Verify the long-lived access token.\n\
             Create one under your Home Assistant profile > Security,\n\
             then set hub.token_env (or HEARTHBEAT_TOKEN)."
        )
    )]
    AuthFailed { message: String },

    #[error("No access token configured")]
    #[diagnostic(
        code(hearthbeat::no_token),
        help(
            "Set HEARTHBEAT_TOKEN, pass --token, or configure hub.token_env\n\
             in the config file (see: hearthbeat config path)."
        )
    )]
    NoToken,

    // ── API ──────────────────────────────────────────────────────────

    #[error("Hub API error: {message}")]
    #[diagnostic(code(hearthbeat::api_error))]
    ApiError { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(hearthbeat::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Configuration file already exists")]
    #[diagnostic(
        code(hearthbeat::config_exists),
        help("Edit it directly, or remove it before running init again.\nPath: {path}")
    )]
    ConfigExists { path: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(hearthbeat::config))]
    Config(String),

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoToken => exit_code::AUTH,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::ConfigExists { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::HubUnreachable { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::Api { message, status: _ } => CliError::ApiError { message },

            CoreError::Config { message } => CliError::Config(message),

            CoreError::Internal(message) => CliError::ApiError { message },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoToken => CliError::NoToken,
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config(other.to_string()),
        }
    }
}
