//! Output formatting: grouped tables, JSON, YAML.
//!
//! Table rendering walks the sensor catalog so the CLI, the dashboard,
//! and the JSON API all expose the same `(section, key)` pairs.

use std::io::{self, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use hearthbeat_core::model::StatsBundle;
use hearthbeat_core::sensors::{Group, SENSORS};

use crate::cli::OutputFormat;

/// Shown in the table when a sensor has no data.
const NO_DATA: &str = "—";

// ── Render dispatchers ───────────────────────────────────────────────

/// Render the full bundle in the chosen format.
pub fn render_bundle(format: &OutputFormat, bundle: &StatsBundle) -> String {
    match format {
        OutputFormat::Table => render_tables(bundle),
        OutputFormat::Json => {
            serde_json::to_string_pretty(bundle).expect("serialization should not fail")
        }
        OutputFormat::Yaml => serde_yaml::to_string(bundle).expect("serialization should not fail"),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Table rendering ──────────────────────────────────────────────────

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,

    #[tabled(rename = "Value")]
    value: String,
}

fn render_tables(bundle: &StatsBundle) -> String {
    let mut sections = Vec::new();

    for group in [Group::Overview, Group::Health, Group::System, Group::Fun] {
        let rows: Vec<MetricRow> = SENSORS
            .iter()
            .filter(|spec| spec.group == group)
            .map(|spec| MetricRow {
                metric: spec.label,
                value: format_value(bundle.value(spec.section, spec.key), spec.unit),
            })
            .collect();

        // A disabled fun section renders nothing rather than a table of dashes.
        if group == Group::Fun && bundle.fun.is_none() {
            continue;
        }

        let table = Table::new(&rows).with(Style::rounded()).to_string();
        sections.push(format!("{}\n{table}", group.title().bold()));
    }

    let refreshed = format!("refreshed at {}", bundle.refreshed_at.to_rfc3339());
    format!("{}\n\n{}", sections.join("\n\n"), refreshed.dimmed())
}

fn format_value(value: Option<serde_json::Value>, unit: Option<&'static str>) -> String {
    let Some(value) = value else {
        return NO_DATA.to_owned();
    };
    let rendered = match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Bool(true) => "yes".to_owned(),
        serde_json::Value::Bool(false) => "no".to_owned(),
        other => other.to_string(),
    };
    match unit {
        Some(unit) => format!("{rendered} {unit}"),
        None => rendered,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_data_renders_a_dash() {
        assert_eq!(format_value(None, None), NO_DATA);
        assert_eq!(format_value(None, Some("%")), NO_DATA);
    }

    #[test]
    fn values_render_with_units() {
        assert_eq!(format_value(Some(json!(42.5)), Some("%")), "42.5 %");
        assert_eq!(format_value(Some(json!("🤷")), None), "🤷");
        assert_eq!(format_value(Some(json!(true)), None), "yes");
    }
}
