// ── Core aggregator ──
//
// Single pass over the snapshot: per-domain tallies, health counters,
// 24-hour activity, lights. Energy summation is a sibling pass with its
// own skip rules. Both are pure — the caller supplies `now`.

use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;

use crate::model::EntityRecord;
use crate::stats::{round1, round3};

/// States excluded from the energy sum before any numeric parsing.
const NON_NUMERIC_STATES: &[&str] = &["unavailable", "unknown", ""];

// ── Entity tally ────────────────────────────────────────────────────

/// Everything one pass over the snapshot can tell us.
#[derive(Debug, Clone, Default)]
pub struct EntityTally {
    pub total: u64,

    /// Per-domain counts in first-observed order.
    pub domains: IndexMap<String, u64>,

    pub unavailable: u64,
    pub unknown: u64,

    /// Entities whose state changed within the last 24 hours. Entities
    /// with no last-changed timestamp never count as active.
    pub active_24h: u64,

    /// `light` domain entities whose state is exactly `"on"`.
    pub lights_on: u64,

    /// True iff no light is on — vacuously true with zero lights.
    pub everything_off: bool,
}

impl EntityTally {
    /// Count for one domain, zero if unseen.
    pub fn domain(&self, name: &str) -> u64 {
        self.domains.get(name).copied().unwrap_or(0)
    }

    /// Number of distinct domains observed.
    pub fn unique_domains(&self) -> u64 {
        self.domains.len() as u64
    }
}

/// Reduce the snapshot to an [`EntityTally`].
pub fn tally_entities(entities: &[EntityRecord], now: DateTime<Utc>) -> EntityTally {
    let cutoff = now - Duration::hours(24);
    let mut tally = EntityTally::default();

    for entity in entities {
        tally.total += 1;
        *tally.domains.entry(entity.id.domain().to_owned()).or_insert(0) += 1;

        match entity.state.as_str() {
            "unavailable" => tally.unavailable += 1,
            "unknown" => tally.unknown += 1,
            _ => {}
        }

        if entity.last_changed.is_some_and(|changed| changed >= cutoff) {
            tally.active_24h += 1;
        }

        if entity.id.domain() == "light" && entity.state == "on" {
            tally.lights_on += 1;
        }
    }

    tally.everything_off = tally.lights_on == 0;
    tally
}

// ── Energy ──────────────────────────────────────────────────────────

/// Sum of current instantaneous energy-sensor readings.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnergyTotal {
    /// Total in kWh, rounded to 3 decimals.
    pub kwh: f64,

    /// Entities that contributed a numeric reading.
    pub contributing: u64,
}

/// Sum the state values of all energy sensors.
///
/// Units `kWh` and `Wh` match case-insensitively; `Wh` values are
/// divided by 1000. Unavailable/unknown/empty and non-numeric states are
/// skipped silently — a single bad sensor never aborts the aggregation.
pub fn aggregate_energy(entities: &[EntityRecord]) -> EnergyTotal {
    let mut total = 0.0_f64;
    let mut contributing = 0_u64;

    for entity in entities {
        let Some(unit) = entity.unit_of_measurement.as_deref() else {
            continue;
        };
        let is_kwh = unit.eq_ignore_ascii_case("kwh");
        let is_wh = unit.eq_ignore_ascii_case("wh");
        if !is_kwh && !is_wh {
            continue;
        }
        if NON_NUMERIC_STATES.contains(&entity.state.as_str()) {
            continue;
        }
        let Ok(mut value) = entity.state.trim().parse::<f64>() else {
            continue;
        };
        if is_wh {
            value /= 1000.0;
        }
        total += value;
        contributing += 1;
    }

    EnergyTotal {
        kwh: round3(total),
        contributing,
    }
}

// ── Uptime ──────────────────────────────────────────────────────────

/// Whole days and fractional hours since boot.
///
/// `(0, 0.0)` when boot time is unavailable or in the future — never an
/// error.
pub fn uptime_from_boot(boot_time: Option<DateTime<Utc>>, now: DateTime<Utc>) -> (u64, f64) {
    let Some(boot) = boot_time else {
        return (0, 0.0);
    };
    let elapsed = now - boot;
    if elapsed < Duration::zero() {
        return (0, 0.0);
    }
    let secs = elapsed.num_seconds() as f64;
    let days = (secs / 86_400.0) as u64;
    let hours = round1(secs / 3_600.0);
    (days, hours)
}
