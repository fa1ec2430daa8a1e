// ── Aggregators ──
//
// Pure, single-pass reducers over an immutable entity snapshot. No
// registry access, no I/O: everything either comes in as an argument or
// is a fixed constant, so both aggregators are safe to run off the
// scheduler task and trivial to test.

pub mod catalog;
pub mod core;
pub mod fun;

pub use self::core::{EnergyTotal, EntityTally, aggregate_energy, tally_entities, uptime_from_boot};
pub use self::fun::aggregate_fun;

/// Round to one decimal place.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to three decimal places.
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
