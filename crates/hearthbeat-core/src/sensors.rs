// ── Sensor catalog ──
//
// The fixed set of named read-only values this engine exposes. Every
// consumer surface (CLI table, dashboard tiles, JSON API) resolves
// values through these `(section, key)` pairs — nothing else reaches
// into the bundle.

use serde::Serialize;

use crate::model::Section;

/// Display grouping for consumer surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    Overview,
    Health,
    System,
    Fun,
}

impl Group {
    pub fn title(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Health => "Health",
            Self::System => "System",
            Self::Fun => "Fun",
        }
    }

    /// Section slug used by the dashboard JSON.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Overview => "core",
            Self::Health => "health",
            Self::System => "system",
            Self::Fun => "fun",
        }
    }
}

/// One exposed value: where it lives in the bundle and how to label it.
#[derive(Debug, Clone, Copy)]
pub struct SensorSpec {
    /// Key inside the section map.
    pub key: &'static str,

    pub label: &'static str,

    /// Material-design icon name, as the dashboard renders it.
    pub icon: &'static str,

    pub section: Section,

    pub group: Group,

    pub unit: Option<&'static str>,

    /// Whether the dashboard shows a tile for this sensor.
    pub on_dashboard: bool,
}

macro_rules! sensor {
    ($key:literal, $label:literal, $icon:literal, $section:expr, $group:expr, $unit:expr, $dash:literal) => {
        SensorSpec {
            key: $key,
            label: $label,
            icon: $icon,
            section: $section,
            group: $group,
            unit: $unit,
            on_dashboard: $dash,
        }
    };
}

/// Every value the engine exposes, in display order.
pub const SENSORS: &[SensorSpec] = &[
    // ── Overview ────────────────────────────────────────────────────
    sensor!("total_devices", "Total Devices", "mdi:devices", Section::Core, Group::Overview, None, true),
    sensor!("total_entities", "Total Entities", "mdi:format-list-bulleted", Section::Core, Group::Overview, None, true),
    sensor!("integrations_count", "Integrations", "mdi:puzzle", Section::Core, Group::Overview, None, true),
    sensor!("unique_domains_count", "Unique Domains", "mdi:tag-multiple", Section::Core, Group::Overview, None, true),
    sensor!("automation_count", "Automations", "mdi:robot", Section::Core, Group::Overview, None, true),
    sensor!("script_count", "Scripts", "mdi:script-text", Section::Core, Group::Overview, None, true),
    sensor!("scene_count", "Scenes", "mdi:palette", Section::Core, Group::Overview, None, true),
    sensor!("light_count", "Lights", "mdi:lightbulb-multiple", Section::Core, Group::Overview, None, false),
    sensor!("switch_count", "Switches", "mdi:toggle-switch", Section::Core, Group::Overview, None, false),
    sensor!("sensor_count", "Sensors", "mdi:thermometer", Section::Core, Group::Overview, None, false),
    sensor!("binary_sensor_count", "Binary Sensors", "mdi:radiobox-marked", Section::Core, Group::Overview, None, false),
    sensor!("person_count", "People", "mdi:account-group", Section::Core, Group::Overview, None, false),
    sensor!("camera_count", "Cameras", "mdi:cctv", Section::Core, Group::Overview, None, false),
    sensor!("media_player_count", "Media Players", "mdi:speaker", Section::Core, Group::Overview, None, false),
    sensor!("cover_count", "Covers", "mdi:window-shutter", Section::Core, Group::Overview, None, false),
    sensor!("climate_count", "Climate Devices", "mdi:thermostat", Section::Core, Group::Overview, None, false),
    sensor!("active_entities_24h", "Active (24 h)", "mdi:pulse", Section::Core, Group::Overview, None, true),
    // ── Health ──────────────────────────────────────────────────────
    sensor!("lights_on", "Lights On", "mdi:lightbulb-on", Section::Core, Group::Health, None, true),
    sensor!("unavailable_count", "Unavailable", "mdi:alert-circle-outline", Section::Core, Group::Health, None, true),
    sensor!("unknown_count", "Unknown State", "mdi:help-circle-outline", Section::Core, Group::Health, None, true),
    sensor!("disabled_entities", "Disabled Entities", "mdi:eye-off-outline", Section::Core, Group::Health, None, true),
    // ── System ──────────────────────────────────────────────────────
    sensor!("host_cpu_pct", "CPU", "mdi:cpu-64-bit", Section::Core, Group::System, Some("%"), true),
    sensor!("host_ram_pct", "RAM", "mdi:memory", Section::Core, Group::System, Some("%"), true),
    sensor!("host_disk_pct", "Disk", "mdi:harddisk", Section::Core, Group::System, Some("%"), true),
    sensor!("uptime_hours", "Uptime (h)", "mdi:clock-outline", Section::Core, Group::System, None, true),
    sensor!("uptime_days", "Uptime (days)", "mdi:timer-outline", Section::Core, Group::System, None, true),
    sensor!("energy_kwh", "Energy Total", "mdi:lightning-bolt", Section::Core, Group::System, Some("kWh"), true),
    // ── Fun ─────────────────────────────────────────────────────────
    sensor!("most_used_emoji", "Most Used Emoji", "mdi:emoticon-outline", Section::Fun, Group::Fun, None, true),
    sensor!("devices_named_after_pokemon", "Pokémon Devices", "mdi:pokeball", Section::Fun, Group::Fun, None, true),
    sensor!("emoji_density", "Emoji Density", "mdi:percent", Section::Fun, Group::Fun, Some("%"), true),
    sensor!("avg_entity_id_length", "Avg Entity ID Length", "mdi:ruler", Section::Fun, Group::Fun, Some("chars"), true),
    sensor!("most_redundant_name", "Most Redundant Name", "mdi:content-duplicate", Section::Fun, Group::Fun, None, true),
    sensor!("names_with_numbers", "Names w/ Numbers", "mdi:numeric", Section::Fun, Group::Fun, None, true),
    sensor!("house_mascot", "Today's Mascot", "mdi:home-heart", Section::Fun, Group::Fun, None, true),
    sensor!("random_daily_quote", "Daily Quote", "mdi:comment-quote", Section::Fun, Group::Fun, None, true),
    sensor!("everything_off", "Everything Off (Party Mode)", "mdi:party-popper", Section::Fun, Group::Fun, None, true),
];

/// Look up a sensor by key.
pub fn sensor(key: &str) -> Option<&'static SensorSpec> {
    SENSORS.iter().find(|spec| spec.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique() {
        for (i, spec) in SENSORS.iter().enumerate() {
            assert!(
                SENSORS.iter().skip(i + 1).all(|other| other.key != spec.key),
                "duplicate sensor key: {}",
                spec.key
            );
        }
    }

    #[test]
    fn lookup_by_key() {
        let spec = sensor("energy_kwh").expect("energy sensor");
        assert_eq!(spec.unit, Some("kWh"));
        assert_eq!(spec.group, Group::System);
    }

    #[test]
    fn fun_sensors_live_in_the_fun_section() {
        assert!(
            SENSORS
                .iter()
                .filter(|s| s.group == Group::Fun)
                .all(|s| s.section == Section::Fun)
        );
    }
}
