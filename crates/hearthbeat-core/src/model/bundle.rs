// ── Aggregation result types ──
//
// A StatsBundle is the complete output of one refresh. It is built once,
// wrapped in an Arc, and swapped into the engine's watch channel in a
// single operation — consumers either see the whole new bundle or the
// whole old one.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

// ── Section ─────────────────────────────────────────────────────────

/// Which half of the bundle a key lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Core,
    Fun,
}

// ── CoreStats ───────────────────────────────────────────────────────

/// Actionable, registry-derived counts and telemetry.
///
/// Registry counts default to `0` when the collaborator is unreachable;
/// host telemetry is `None` when disabled or unavailable — the facade
/// surfaces `None`/null as "no data", never as zero.
#[derive(Debug, Clone, Serialize)]
pub struct CoreStats {
    // ── Totals ──
    pub total_entities: u64,
    pub total_devices: u64,
    pub integrations_count: u64,
    pub disabled_entities: u64,

    // ── Per-domain convenience counts ──
    pub automation_count: u64,
    pub script_count: u64,
    pub scene_count: u64,
    pub light_count: u64,
    pub switch_count: u64,
    pub sensor_count: u64,
    pub binary_sensor_count: u64,
    pub person_count: u64,
    pub camera_count: u64,
    pub media_player_count: u64,
    pub cover_count: u64,
    pub climate_count: u64,

    /// Number of distinct domains observed in the snapshot.
    pub unique_domains_count: u64,

    /// Full per-domain tally, in first-observed order.
    pub domain_counts: IndexMap<String, u64>,

    // ── Health ──
    pub unavailable_count: u64,
    pub unknown_count: u64,
    pub active_entities_24h: u64,
    pub lights_on: u64,

    // ── System ──
    pub uptime_days: u64,
    pub uptime_hours: f64,
    pub host_cpu_pct: Option<f64>,
    pub host_ram_pct: Option<f64>,
    pub host_disk_pct: Option<f64>,

    // ── Energy ──
    /// Sum of current instantaneous energy-sensor readings, in kWh.
    pub energy_kwh: f64,
    pub energy_entity_count: u64,
}

// ── FunStats ────────────────────────────────────────────────────────

/// Whimsical, display-name-derived metrics. No operational value.
#[derive(Debug, Clone, Serialize)]
pub struct FunStats {
    pub avg_entity_id_length: f64,
    pub longest_entity_id: String,
    pub shortest_entity_id: String,

    pub most_used_emoji: String,
    pub emoji_density: f64,

    pub devices_named_after_pokemon: u64,
    pub most_redundant_name: String,
    pub names_with_numbers: u64,

    pub random_daily_quote: String,
    pub house_mascot: String,

    pub everything_off: bool,
}

// ── StatsBundle ─────────────────────────────────────────────────────

/// The complete, internally consistent result of one successful refresh.
#[derive(Debug, Clone, Serialize)]
pub struct StatsBundle {
    pub core: CoreStats,

    /// Absent when fun stats are disabled by configuration.
    pub fun: Option<FunStats>,

    pub refreshed_at: DateTime<Utc>,
}

impl StatsBundle {
    /// Render one section as a JSON object for keyed lookup.
    ///
    /// A disabled fun section yields an empty map.
    pub fn section(&self, section: Section) -> serde_json::Map<String, serde_json::Value> {
        let value = match section {
            Section::Core => serde_json::to_value(&self.core).ok(),
            Section::Fun => self
                .fun
                .as_ref()
                .and_then(|fun| serde_json::to_value(fun).ok()),
        };
        match value {
            Some(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }

    /// Read-only consumer facade: fetch a value by `(section, key)`.
    ///
    /// An absent key or a JSON null is `None` — callers must treat it
    /// as "no data" rather than defaulting to zero.
    pub fn value(&self, section: Section, key: &str) -> Option<serde_json::Value> {
        let mut map = self.section(section);
        let value = map.remove(key)?;
        if value.is_null() { None } else { Some(value) }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_bundle() -> StatsBundle {
        StatsBundle {
            core: CoreStats {
                total_entities: 3,
                total_devices: 2,
                integrations_count: 1,
                disabled_entities: 0,
                automation_count: 0,
                script_count: 0,
                scene_count: 0,
                light_count: 1,
                switch_count: 0,
                sensor_count: 2,
                binary_sensor_count: 0,
                person_count: 0,
                camera_count: 0,
                media_player_count: 0,
                cover_count: 0,
                climate_count: 0,
                unique_domains_count: 2,
                domain_counts: IndexMap::from([("light".to_owned(), 1), ("sensor".to_owned(), 2)]),
                unavailable_count: 0,
                unknown_count: 0,
                active_entities_24h: 3,
                lights_on: 1,
                uptime_days: 0,
                uptime_hours: 0.0,
                host_cpu_pct: None,
                host_ram_pct: Some(41.5),
                host_disk_pct: None,
                energy_kwh: 1.25,
                energy_entity_count: 1,
            },
            fun: None,
            refreshed_at: Utc::now(),
        }
    }

    #[test]
    fn value_resolves_present_keys() {
        let bundle = sample_bundle();
        assert_eq!(
            bundle.value(Section::Core, "total_entities"),
            Some(serde_json::json!(3))
        );
        assert_eq!(
            bundle.value(Section::Core, "host_ram_pct"),
            Some(serde_json::json!(41.5))
        );
    }

    #[test]
    fn null_telemetry_is_no_data_not_zero() {
        let bundle = sample_bundle();
        assert_eq!(bundle.value(Section::Core, "host_cpu_pct"), None);
    }

    #[test]
    fn absent_key_is_no_data() {
        let bundle = sample_bundle();
        assert_eq!(bundle.value(Section::Core, "does_not_exist"), None);
    }

    #[test]
    fn disabled_fun_section_is_empty() {
        let bundle = sample_bundle();
        assert!(bundle.section(Section::Fun).is_empty());
        assert_eq!(bundle.value(Section::Fun, "most_used_emoji"), None);
    }
}
