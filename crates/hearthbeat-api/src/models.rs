// ── Wire types for the Home Assistant REST API ──
//
// These mirror the JSON the hub sends; domain types live in
// `hearthbeat-core`. Attributes stay a raw JSON map here — the core
// crate extracts the two attributes it cares about into a fixed-shape
// record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the `GET /api/states` dump.
#[derive(Debug, Clone, Deserialize)]
pub struct EntityState {
    pub entity_id: String,

    pub state: String,

    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,

    /// When the state last changed. The hub always sends this, but a
    /// missing or unparsable value degrades to `None` rather than
    /// failing the whole dump.
    #[serde(default)]
    pub last_changed: Option<DateTime<Utc>>,
}

/// Response of `GET /api/` — the liveness probe.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiStatus {
    pub message: String,
}

/// Subset of `GET /api/config` used for labeling.
#[derive(Debug, Clone, Deserialize)]
pub struct InstanceConfig {
    #[serde(default)]
    pub location_name: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub time_zone: Option<String>,
}

/// Registry counts reduced from the WebSocket command API.
///
/// The full registry payloads are dropped after counting — consumers
/// only ever see these three numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryCounts {
    /// Devices in the device registry.
    pub devices: u64,

    /// Entity-registry entries with a non-null `disabled_by`.
    pub disabled_entities: u64,

    /// Active config entries (installed integrations).
    pub integrations: u64,
}
