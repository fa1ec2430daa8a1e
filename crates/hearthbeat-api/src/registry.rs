// ── WebSocket registry commands ──
//
// The hub exposes its device/entity/config-entry registries only over
// the WebSocket command API. This module opens a short-lived socket,
// runs the auth handshake (auth_required → auth → auth_ok), issues the
// three list commands, and reduces the result arrays to counts. The
// payloads themselves are never surfaced.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tokio_tungstenite::tungstenite::{self, ClientRequestBuilder};
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::RegistryCounts;

// Command ids for the three registry queries.
const CMD_DEVICE_REGISTRY: u64 = 1;
const CMD_ENTITY_REGISTRY: u64 = 2;
const CMD_CONFIG_ENTRIES: u64 = 3;

// ── Server message envelope ──────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ServerMessage {
    #[serde(rename = "auth_required")]
    AuthRequired {},

    #[serde(rename = "auth_ok")]
    AuthOk {},

    #[serde(rename = "auth_invalid")]
    AuthInvalid {
        #[serde(default)]
        message: Option<String>,
    },

    #[serde(rename = "result")]
    CommandResult {
        id: u64,
        success: bool,
        #[serde(default)]
        result: serde_json::Value,
        #[serde(default)]
        error: Option<CommandError>,
    },

    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct CommandError {
    #[serde(default)]
    message: Option<String>,
}

// ── Public entry point ───────────────────────────────────────────────

/// Fetch device/disabled-entity/integration counts over the WebSocket API.
///
/// The whole exchange (connect, auth, three commands) runs under one
/// deadline — a hub that never answers yields [`Error::Timeout`], not a
/// hung caller.
pub(crate) async fn fetch_registry_counts(
    base_url: &Url,
    token: &SecretString,
    timeout: Duration,
) -> Result<RegistryCounts, Error> {
    let ws_url = websocket_url(base_url)?;

    tokio::time::timeout(timeout, run_exchange(&ws_url, token))
        .await
        .map_err(|_| Error::Timeout {
            timeout_secs: timeout.as_secs(),
        })?
}

/// Derive the WebSocket endpoint from the hub base URL:
/// `http://host:8123` → `ws://host:8123/api/websocket`.
fn websocket_url(base_url: &Url) -> Result<Url, Error> {
    let scheme = if base_url.scheme() == "https" {
        "wss"
    } else {
        "ws"
    };
    let host = base_url.host_str().unwrap_or("localhost");
    let url_str = match base_url.port() {
        Some(p) => format!("{scheme}://{host}:{p}/api/websocket"),
        None => format!("{scheme}://{host}/api/websocket"),
    };
    Url::parse(&url_str).map_err(Error::InvalidUrl)
}

// ── Exchange ─────────────────────────────────────────────────────────

async fn run_exchange(ws_url: &Url, token: &SecretString) -> Result<RegistryCounts, Error> {
    debug!(url = %ws_url, "connecting to hub WebSocket");

    let uri: tungstenite::http::Uri = ws_url
        .as_str()
        .parse()
        .map_err(|e: tungstenite::http::uri::InvalidUri| Error::WebSocket(e.to_string()))?;
    let request = ClientRequestBuilder::new(uri);

    let (mut ws, _response) = tokio_tungstenite::connect_async(request)
        .await
        .map_err(|e| Error::WebSocket(e.to_string()))?;

    // ── Auth handshake ───────────────────────────────────────────
    loop {
        match next_message(&mut ws).await? {
            ServerMessage::AuthRequired {} => {
                let payload = json!({
                    "type": "auth",
                    "access_token": token.expose_secret(),
                })
                .to_string();
                ws.send(tungstenite::Message::Text(payload.into()))
                    .await
                    .map_err(|e| Error::WebSocket(e.to_string()))?;
            }
            ServerMessage::AuthOk {} => break,
            ServerMessage::AuthInvalid { message } => {
                return Err(Error::Authentication {
                    message: message.unwrap_or_else(|| "access token rejected".into()),
                });
            }
            _ => {}
        }
    }

    // ── Registry commands ────────────────────────────────────────
    for (id, command) in [
        (CMD_DEVICE_REGISTRY, "config/device_registry/list"),
        (CMD_ENTITY_REGISTRY, "config/entity_registry/list"),
        (CMD_CONFIG_ENTRIES, "config_entries/get"),
    ] {
        let payload = json!({ "id": id, "type": command }).to_string();
        ws.send(tungstenite::Message::Text(payload.into()))
            .await
            .map_err(|e| Error::WebSocket(e.to_string()))?;
    }

    let mut devices: Option<u64> = None;
    let mut disabled: Option<u64> = None;
    let mut integrations: Option<u64> = None;

    while devices.is_none() || disabled.is_none() || integrations.is_none() {
        match next_message(&mut ws).await? {
            ServerMessage::CommandResult {
                id,
                success: true,
                result,
                ..
            } => match id {
                CMD_DEVICE_REGISTRY => devices = Some(array_len(&result)),
                CMD_ENTITY_REGISTRY => disabled = Some(count_disabled(&result)),
                CMD_CONFIG_ENTRIES => integrations = Some(array_len(&result)),
                other => trace!(id = other, "ignoring unrequested result"),
            },
            ServerMessage::CommandResult {
                id,
                success: false,
                error,
                ..
            } => {
                return Err(Error::Registry {
                    message: format!(
                        "command {id} rejected: {}",
                        error
                            .and_then(|e| e.message)
                            .unwrap_or_else(|| "no error message".into())
                    ),
                });
            }
            _ => {}
        }
    }

    let _ = ws.close(None).await;

    Ok(RegistryCounts {
        devices: devices.unwrap_or(0),
        disabled_entities: disabled.unwrap_or(0),
        integrations: integrations.unwrap_or(0),
    })
}

/// Read frames until the next parsable text message.
async fn next_message<S>(ws: &mut S) -> Result<ServerMessage, Error>
where
    S: StreamExt<Item = Result<tungstenite::Message, tungstenite::Error>> + Unpin,
{
    loop {
        match ws.next().await {
            Some(Ok(tungstenite::Message::Text(text))) => {
                match serde_json::from_str::<ServerMessage>(text.as_str()) {
                    Ok(msg) => return Ok(msg),
                    Err(e) => trace!(error = %e, "unparsable WebSocket frame, skipping"),
                }
            }
            Some(Ok(tungstenite::Message::Ping(_))) => {
                // tungstenite answers pongs automatically
                trace!("WebSocket ping");
            }
            Some(Ok(tungstenite::Message::Close(_))) | None => {
                return Err(Error::WebSocket("connection closed by hub".into()));
            }
            Some(Err(e)) => return Err(Error::WebSocket(e.to_string())),
            _ => {
                // Binary, Pong, Frame — ignore
            }
        }
    }
}

// ── Result reducers ──────────────────────────────────────────────────

fn array_len(value: &serde_json::Value) -> u64 {
    value.as_array().map(Vec::len).unwrap_or(0) as u64
}

/// Count entity-registry entries with a non-null `disabled_by`.
fn count_disabled(value: &serde_json::Value) -> u64 {
    value
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter(|e| e.get("disabled_by").is_some_and(|v| !v.is_null()))
                .count() as u64
        })
        .unwrap_or(0)
}
