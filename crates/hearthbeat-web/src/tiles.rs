// ── Tile JSON assembly ──
//
// Translates the sensor catalog + the latest bundle into the dashboard
// payload: one object per dashboard sensor, keyed by sensor key, with
// `{label, icon, section, unit, state, attributes}`. A missing bundle
// or a null value renders as the string "unavailable" — the page shows
// a muted tile instead of a zero.

use serde_json::{Map, Value, json};

use hearthbeat_core::model::{Section, StatsBundle};
use hearthbeat_core::sensors::{SENSORS, SensorSpec};

/// Build the `/api/stats` payload from the latest bundle (if any).
pub fn stats_payload(bundle: Option<&StatsBundle>) -> Value {
    let mut out = Map::new();

    for spec in SENSORS.iter().filter(|spec| spec.on_dashboard) {
        let state = bundle
            .and_then(|b| b.value(spec.section, spec.key))
            .unwrap_or_else(|| json!("unavailable"));
        let attributes = bundle
            .map(|b| tile_attributes(spec, b))
            .unwrap_or_default();

        out.insert(
            spec.key.to_owned(),
            json!({
                "label": spec.label,
                "icon": spec.icon,
                "section": spec.group.slug(),
                "unit": spec.unit,
                "state": state,
                "attributes": Value::Object(attributes),
            }),
        );
    }

    Value::Object(out)
}

/// Extra attributes for the handful of tiles that carry them.
fn tile_attributes(spec: &SensorSpec, bundle: &StatsBundle) -> Map<String, Value> {
    let mut attrs = Map::new();
    match spec.key {
        "total_entities" => {
            if let Some(breakdown) = bundle.value(Section::Core, "domain_counts") {
                attrs.insert("domain_breakdown".to_owned(), breakdown);
            }
        }
        "energy_kwh" => {
            if let Some(count) = bundle.value(Section::Core, "energy_entity_count") {
                attrs.insert("contributing_sensors".to_owned(), count);
            }
        }
        "avg_entity_id_length" => {
            for key in ["longest_entity_id", "shortest_entity_id"] {
                if let Some(id) = bundle.value(Section::Fun, key) {
                    attrs.insert(key.to_owned(), id);
                }
            }
        }
        _ => {}
    }
    attrs
}
