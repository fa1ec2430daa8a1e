//! Configuration for the hearthbeat daemon and CLI.
//!
//! TOML file + `HEARTHBEAT_`-prefixed environment variables, token
//! resolution (env indirection + plaintext), and translation to the
//! engine/client config types. Both the daemon and the CLI depend on
//! this crate.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use hearthbeat_api::ClientConfig;
use hearthbeat_core::{DEFAULT_POLL_INTERVAL_SECS, EngineConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no access token configured (set hub.token, hub.token_env, or HEARTHBEAT_HUB__TOKEN)")]
    NoToken,

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by daemon and CLI.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub hub: HubSettings,

    #[serde(default)]
    pub engine: EngineSettings,

    #[serde(default)]
    pub dashboard: DashboardSettings,
}

/// Where the hub lives and how to authenticate against it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HubSettings {
    /// Hub base URL (e.g., "http://homeassistant.local:8123").
    #[serde(default = "default_hub_url")]
    pub url: String,

    /// Long-lived access token (plaintext — prefer `token_env`).
    pub token: Option<String>,

    /// Environment variable name containing the token.
    pub token_env: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for HubSettings {
    fn default() -> Self {
        Self {
            url: default_hub_url(),
            token: None,
            token_env: None,
            timeout_secs: default_timeout(),
        }
    }
}

/// Engine options — see the interval bounds on the core crate.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineSettings {
    /// Seconds between polls (30–86400).
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_true")]
    pub enable_fun_stats: bool,

    #[serde(default = "default_true")]
    pub enable_host_telemetry: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            enable_fun_stats: true,
            enable_host_telemetry: true,
        }
    }
}

/// Where the dashboard listens.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DashboardSettings {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

fn default_hub_url() -> String {
    "http://homeassistant.local:8123".into()
}
fn default_timeout() -> u64 {
    10
}
fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}
fn default_true() -> bool {
    true
}
fn default_bind() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8099
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "hearthbeat", "hearthbeat").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("hearthbeat");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load settings from file + environment.
///
/// Environment variables use `__` as the section separator:
/// `HEARTHBEAT_ENGINE__POLL_INTERVAL_SECS=60`.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(&config_path())
}

/// Load settings from an explicit file path (plus the environment).
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("HEARTHBEAT_").split("__"));

    let settings: Settings = figment.extract()?;
    Ok(settings)
}

/// Load settings, returning defaults if nothing is configured.
pub fn load_settings_or_default() -> Settings {
    load_settings().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize settings to TOML and write to the canonical config path.
pub fn save_settings(settings: &Settings) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(settings)?;
    std::fs::write(&path, toml_str)?;
    Ok(path)
}

// ── Validation ──────────────────────────────────────────────────────

/// Validate the full settings tree.
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if url::Url::parse(&settings.hub.url).is_err() {
        return Err(ConfigError::Validation {
            field: "hub.url".into(),
            reason: format!("invalid URL: {}", settings.hub.url),
        });
    }

    if !EngineConfig::poll_interval_valid(settings.engine.poll_interval_secs) {
        return Err(ConfigError::Validation {
            field: "engine.poll_interval_secs".into(),
            reason: format!(
                "expected 30..=86400 seconds, got {}",
                settings.engine.poll_interval_secs
            ),
        });
    }

    if settings.hub.timeout_secs == 0 {
        return Err(ConfigError::Validation {
            field: "hub.timeout_secs".into(),
            reason: "must be at least 1 second".into(),
        });
    }

    Ok(())
}

// ── Token resolution ────────────────────────────────────────────────

/// Resolve the access token: env indirection wins over plaintext.
pub fn resolve_token(hub: &HubSettings) -> Result<SecretString, ConfigError> {
    if let Some(ref env_name) = hub.token_env {
        if let Ok(value) = std::env::var(env_name) {
            return Ok(SecretString::from(value));
        }
    }

    if let Some(ref token) = hub.token {
        return Ok(SecretString::from(token.clone()));
    }

    Err(ConfigError::NoToken)
}

// ── Translation to runtime configs ──────────────────────────────────

/// Build the API client config from validated settings.
pub fn client_config(settings: &Settings) -> Result<ClientConfig, ConfigError> {
    let base_url: url::Url =
        settings
            .hub
            .url
            .parse()
            .map_err(|_| ConfigError::Validation {
                field: "hub.url".into(),
                reason: format!("invalid URL: {}", settings.hub.url),
            })?;
    let token = resolve_token(&settings.hub)?;

    Ok(ClientConfig {
        base_url,
        token,
        timeout: Duration::from_secs(settings.hub.timeout_secs),
    })
}

/// Build the engine config from validated settings.
pub fn engine_config(settings: &Settings) -> EngineConfig {
    EngineConfig {
        poll_interval: Duration::from_secs(settings.engine.poll_interval_secs),
        enable_fun_stats: settings.engine.enable_fun_stats,
        enable_host_telemetry: settings.engine.enable_host_telemetry,
    }
}
