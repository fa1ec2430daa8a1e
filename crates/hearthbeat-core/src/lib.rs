//! Statistics engine between `hearthbeat-api` and the consumer surfaces
//! (CLI / dashboard).
//!
//! This crate owns the domain model and the snapshot-and-aggregate
//! pipeline:
//!
//! - **[`StatsEngine`]** — Central facade managing the refresh lifecycle:
//!   [`start()`](StatsEngine::start) performs one immediate refresh so
//!   consumers have data on first read, then spawns the periodic tick
//!   task. [`refresh_now()`](StatsEngine::refresh_now) provides a
//!   one-shot mode for single CLI invocations.
//!
//! - **Aggregators** ([`stats`]) — Pure single-pass reducers over an
//!   immutable entity snapshot. The core tally produces registry-derived
//!   counts and health indicators; the fun aggregator produces
//!   display-name-derived metrics and runs off the scheduler task.
//!
//! - **[`StatsBundle`]** — The immutable result of one refresh,
//!   published wholesale through a `watch` channel. Readers never
//!   observe a half-written bundle; a failed refresh leaves the previous
//!   bundle untouched.
//!
//! - **Domain model** ([`model`]) — [`EntityRecord`] (fixed-shape
//!   snapshot record), [`EntityId`] (domain = prefix before the first
//!   `.`), and the stats types addressable by `(section, key)`.

pub mod engine;
pub mod error;
pub mod model;
pub mod sensors;
pub mod stats;
pub mod telemetry;

// ── Primary re-exports ──────────────────────────────────────────────
pub use engine::{EngineConfig, RefreshHealth, StatsEngine};
pub use engine::{DEFAULT_POLL_INTERVAL_SECS, MAX_POLL_INTERVAL_SECS, MIN_POLL_INTERVAL_SECS};
pub use error::CoreError;
pub use model::{CoreStats, EntityId, EntityRecord, FunStats, Section, StatsBundle};
pub use sensors::{Group, SENSORS, SensorSpec};
