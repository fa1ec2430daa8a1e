// Home Assistant REST client
//
// Wraps `reqwest::Client` with hub-specific URL construction and
// Bearer-token auth. The WebSocket registry commands live in
// `registry.rs` to keep this module focused on HTTP mechanics.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{ApiStatus, EntityState, InstanceConfig, RegistryCounts};
use crate::registry;

/// Connection settings for a single hub.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Hub base URL, e.g. `http://homeassistant.local:8123`.
    pub base_url: Url,

    /// Long-lived access token.
    pub token: SecretString,

    /// Per-request timeout.
    pub timeout: Duration,
}

/// HTTP client for the Home Assistant REST API.
///
/// All methods return deserialized payloads; HTTP 401 maps to
/// [`Error::Authentication`] and other non-success statuses to
/// [`Error::Api`] with a body preview.
pub struct HubClient {
    http: reqwest::Client,
    base_url: Url,
    token: SecretString,
    timeout: Duration,
}

impl HubClient {
    /// Create a new client from a [`ClientConfig`].
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(Error::Transport)?;
        Ok(Self {
            http,
            base_url: config.base_url,
            token: config.token,
            timeout: config.timeout,
        })
    }

    /// The hub base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// `GET /api/` — liveness probe.
    pub async fn status(&self) -> Result<ApiStatus, Error> {
        self.get("").await
    }

    /// `GET /api/states` — the full entity-state dump.
    ///
    /// This is the snapshot capture: one consistent read of every
    /// tracked entity, unfiltered. Filtering is the aggregators' job.
    pub async fn states(&self) -> Result<Vec<EntityState>, Error> {
        self.get("states").await
    }

    /// `GET /api/config` — instance metadata (location name, version).
    pub async fn instance_config(&self) -> Result<InstanceConfig, Error> {
        self.get("config").await
    }

    /// Registry counts via the WebSocket command API.
    ///
    /// Opens a short-lived socket, authenticates, issues the three
    /// registry list commands, and reduces the results to counts.
    pub async fn registry_counts(&self) -> Result<RegistryCounts, Error> {
        registry::fetch_registry_counts(&self.base_url, &self.token, self.timeout).await
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/api/{path}`.
    fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/api/{path}");
        Url::parse(&full).map_err(Error::InvalidUrl)
    }

    /// Send an authenticated GET request and deserialize the body.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .bearer_auth(self.token.expose_secret())
            .send()
            .await
            .map_err(Error::Transport)?;

        self.parse_body(resp).await
    }

    /// Check the HTTP status and deserialize the JSON body.
    async fn parse_body<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "access token rejected (HTTP 401)".into(),
            });
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: body[..body.len().min(200)].to_owned(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }
}
