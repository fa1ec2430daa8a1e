// ── Snapshot record types ──
//
// EntityId and EntityRecord form the input of every aggregation pass.
// A record is a fixed-shape extract of the raw API state: only the two
// well-known attributes survive, everything else is dropped at capture
// time.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hearthbeat_api::EntityState;

// ── EntityId ────────────────────────────────────────────────────────

/// Canonical entity identifier in `domain.object_id` form.
///
/// The domain is the prefix before the first `.`; an id without a
/// separator is its own domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The grouping prefix before the first separator.
    pub fn domain(&self) -> &str {
        self.0.split('.').next().unwrap_or("")
    }

    /// Length in characters (not bytes) — emoji-heavy ids count once
    /// per glyph, matching how the fun metrics are defined.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// ── EntityRecord ────────────────────────────────────────────────────

/// One entity's state at capture time.
///
/// Created fresh every poll cycle from the raw API dump and handed to
/// the aggregators as an immutable slice; never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct EntityRecord {
    pub id: EntityId,

    pub state: String,

    pub friendly_name: Option<String>,

    pub unit_of_measurement: Option<String>,

    pub last_changed: Option<DateTime<Utc>>,
}

impl From<EntityState> for EntityRecord {
    fn from(raw: EntityState) -> Self {
        let friendly_name = raw
            .attributes
            .get("friendly_name")
            .and_then(|v| v.as_str())
            .map(str::to_owned);
        let unit_of_measurement = raw
            .attributes
            .get("unit_of_measurement")
            .and_then(|v| v.as_str())
            .map(str::to_owned);

        Self {
            id: EntityId::new(raw.entity_id),
            state: raw.state,
            friendly_name,
            unit_of_measurement,
            last_changed: raw.last_changed,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn domain_is_prefix_before_first_separator() {
        assert_eq!(EntityId::new("light.kitchen").domain(), "light");
        assert_eq!(EntityId::new("binary_sensor.door.front").domain(), "binary_sensor");
    }

    #[test]
    fn id_without_separator_is_its_own_domain() {
        assert_eq!(EntityId::new("standalone").domain(), "standalone");
    }

    #[test]
    fn char_len_counts_glyphs_not_bytes() {
        let id = EntityId::new("light.küche");
        assert_eq!(id.char_len(), 11);
        assert!(id.as_str().len() > 11);
    }

    #[test]
    fn record_extracts_known_attributes() {
        let raw: EntityState = serde_json::from_value(json!({
            "entity_id": "sensor.power",
            "state": "12.5",
            "attributes": {
                "friendly_name": "Power Meter",
                "unit_of_measurement": "kWh",
                "device_class": "energy"
            }
        }))
        .unwrap();

        let record = EntityRecord::from(raw);
        assert_eq!(record.id.domain(), "sensor");
        assert_eq!(record.friendly_name.as_deref(), Some("Power Meter"));
        assert_eq!(record.unit_of_measurement.as_deref(), Some("kWh"));
        assert!(record.last_changed.is_none());
    }

    #[test]
    fn record_tolerates_non_string_attributes() {
        let raw: EntityState = serde_json::from_value(json!({
            "entity_id": "sensor.odd",
            "state": "1",
            "attributes": { "friendly_name": 42, "unit_of_measurement": ["kWh"] }
        }))
        .unwrap();

        let record = EntityRecord::from(raw);
        assert!(record.friendly_name.is_none());
        assert!(record.unit_of_measurement.is_none());
    }
}
