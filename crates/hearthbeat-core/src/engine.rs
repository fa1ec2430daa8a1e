// ── Refresh engine ──
//
// Full lifecycle management for the polling pipeline: an immediate
// first refresh, a periodic tick task, and a watch-published result
// bundle. One task owns the whole refresh, so overlapping ticks are
// structurally impossible; consumers read the latest bundle without
// ever triggering recomputation.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use hearthbeat_api::{HubClient, RegistryCounts};

use crate::error::CoreError;
use crate::model::{CoreStats, EntityRecord, StatsBundle};
use crate::stats::{
    EnergyTotal, EntityTally, aggregate_energy, aggregate_fun, tally_entities, uptime_from_boot,
};
use crate::telemetry::{HostReading, probe_host};

// ── Configuration ────────────────────────────────────────────────────

/// Shortest accepted poll interval, in seconds.
pub const MIN_POLL_INTERVAL_SECS: u64 = 30;

/// Longest accepted poll interval, in seconds (one day).
pub const MAX_POLL_INTERVAL_SECS: u64 = 86_400;

/// Default poll interval (5 minutes).
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 300;

/// Engine options. Changing them requires a full
/// [`reconfigure()`](StatsEngine::reconfigure) — the old result is
/// discarded and the tick task restarts with the new interval.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub poll_interval: Duration,
    pub enable_fun_stats: bool,
    pub enable_host_telemetry: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            enable_fun_stats: true,
            enable_host_telemetry: true,
        }
    }
}

impl EngineConfig {
    /// Whether an interval in seconds falls inside the accepted range.
    pub fn poll_interval_valid(secs: u64) -> bool {
        (MIN_POLL_INTERVAL_SECS..=MAX_POLL_INTERVAL_SECS).contains(&secs)
    }
}

// ── RefreshHealth ────────────────────────────────────────────────────

/// Refresh state observable by consumers.
///
/// A failed refresh never clears the previous bundle: `Failed` carries
/// the timestamp of the last good result (if any) that remains readable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RefreshHealth {
    /// Before the first refresh attempt.
    Pending,

    Ok {
        refreshed_at: DateTime<Utc>,
    },

    Failed {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        last_good: Option<DateTime<Utc>>,
    },
}

// ── StatsEngine ──────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<EngineInner>`. [`start()`](Self::start)
/// refreshes once immediately (consumers have data on first read), then
/// spawns the periodic tick task. A refresh error marks the health
/// `Failed` and the next tick simply retries — no backoff, no circuit
/// breaker.
#[derive(Clone)]
pub struct StatsEngine {
    inner: Arc<EngineInner>,
}

struct EngineInner {
    client: HubClient,
    config: Mutex<EngineConfig>,
    bundle: watch::Sender<Option<Arc<StatsBundle>>>,
    health: watch::Sender<RefreshHealth>,
    cancel: CancellationToken,
    /// Child token for the current run — cancelled on shutdown,
    /// replaced on restart (avoids permanent cancellation).
    cancel_child: Mutex<CancellationToken>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl StatsEngine {
    /// Create an engine. Does NOT poll — call [`start()`](Self::start)
    /// to refresh and spawn the tick task, or
    /// [`refresh_now()`](Self::refresh_now) for a one-shot.
    pub fn new(client: HubClient, config: EngineConfig) -> Self {
        let (bundle, _) = watch::channel(None);
        let (health, _) = watch::channel(RefreshHealth::Pending);
        let cancel = CancellationToken::new();
        let cancel_child = cancel.child_token();

        Self {
            inner: Arc::new(EngineInner {
                client,
                config: Mutex::new(config),
                bundle,
                health,
                cancel,
                cancel_child: Mutex::new(cancel_child),
                task: Mutex::new(None),
            }),
        }
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Refresh once immediately, then poll on the configured interval.
    ///
    /// A failing first refresh is logged and marked in the health
    /// channel but does not abort the engine — the tick task retries.
    pub async fn start(&self) {
        let child = self.inner.cancel.child_token();
        *self.inner.cancel_child.lock().await = child.clone();

        if let Err(e) = self.refresh().await {
            warn!(error = %e, "initial refresh failed; retrying on next tick");
        }

        let period = self.inner.config.lock().await.poll_interval;
        let engine = self.clone();
        *self.inner.task.lock().await = Some(tokio::spawn(refresh_task(engine, period, child)));
        info!(interval_secs = period.as_secs(), "stats engine started");
    }

    /// Stop the tick task and wait for it to finish.
    pub async fn shutdown(&self) {
        self.inner.cancel_child.lock().await.cancel();
        if let Some(handle) = self.inner.task.lock().await.take() {
            let _ = handle.await;
        }
        debug!("stats engine stopped");
    }

    /// Apply a new configuration: stop, discard the old result, restart.
    pub async fn reconfigure(&self, config: EngineConfig) {
        info!("reconfiguring stats engine");
        self.shutdown().await;
        *self.inner.config.lock().await = config;
        self.inner.bundle.send_replace(None);
        let _ = self.inner.health.send(RefreshHealth::Pending);
        self.start().await;
    }

    // ── Consumer surface ─────────────────────────────────────────────

    /// The most recent bundle, if any refresh has succeeded.
    pub fn latest(&self) -> Option<Arc<StatsBundle>> {
        self.inner.bundle.borrow().clone()
    }

    /// Subscribe to bundle replacements.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<StatsBundle>>> {
        self.inner.bundle.subscribe()
    }

    /// Subscribe to refresh health transitions.
    pub fn health(&self) -> watch::Receiver<RefreshHealth> {
        self.inner.health.subscribe()
    }

    /// Run a single refresh and return the resulting bundle.
    pub async fn refresh_now(&self) -> Result<Arc<StatsBundle>, CoreError> {
        self.refresh().await
    }

    // ── Refresh pipeline ─────────────────────────────────────────────

    /// One tick: snapshot, aggregate, publish.
    ///
    /// Only the snapshot capture is fatal. Registry counts, host
    /// telemetry, and the fun aggregation each fail soft to their
    /// documented defaults. The bundle is published in a single watch
    /// swap after everything completes.
    async fn refresh(&self) -> Result<Arc<StatsBundle>, CoreError> {
        let config = self.inner.config.lock().await.clone();
        let started = std::time::Instant::now();

        let raw = match self.inner.client.states().await {
            Ok(states) => states,
            Err(e) => {
                let err = CoreError::from(e);
                self.mark_failed(&err);
                return Err(err);
            }
        };
        let snapshot: Arc<[EntityRecord]> = raw.into_iter().map(EntityRecord::from).collect();
        let now = Utc::now();

        let tally = tally_entities(&snapshot, now);
        let energy = aggregate_energy(&snapshot);

        let registry_fut = async {
            match self.inner.client.registry_counts().await {
                Ok(counts) => counts,
                Err(e) => {
                    debug!(error = %e, "registry counts unavailable, defaulting to zero");
                    RegistryCounts::default()
                }
            }
        };

        let host_fut = probe_host(config.enable_host_telemetry);

        let fun_fut = async {
            if !config.enable_fun_stats {
                return None;
            }
            let snap = Arc::clone(&snapshot);
            let everything_off = tally.everything_off;
            let day_of_year = now.ordinal();
            match tokio::task::spawn_blocking(move || {
                aggregate_fun(&snap, everything_off, day_of_year)
            })
            .await
            {
                Ok(fun) => Some(fun),
                Err(e) => {
                    warn!(error = %e, "fun aggregation failed");
                    None
                }
            }
        };

        let (registry, host, fun) = tokio::join!(registry_fut, host_fut, fun_fut);

        let core = assemble_core(&tally, energy, registry, &host, now);
        let bundle = Arc::new(StatsBundle {
            core,
            fun,
            refreshed_at: now,
        });

        self.inner.bundle.send_replace(Some(Arc::clone(&bundle)));
        let _ = self.inner.health.send(RefreshHealth::Ok { refreshed_at: now });

        debug!(
            entities = tally.total,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "refresh complete"
        );
        Ok(bundle)
    }

    fn mark_failed(&self, err: &CoreError) {
        let last_good = self.latest().map(|bundle| bundle.refreshed_at);
        let _ = self.inner.health.send(RefreshHealth::Failed {
            error: err.to_string(),
            last_good,
        });
    }
}

// ── Background tick task ─────────────────────────────────────────────

async fn refresh_task(engine: StatsEngine, period: Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval.tick().await; // consume the immediate first tick; start() already refreshed

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                if let Err(e) = engine.refresh().await {
                    warn!(error = %e, "scheduled refresh failed");
                }
            }
        }
    }
}

// ── Bundle assembly ──────────────────────────────────────────────────

fn assemble_core(
    tally: &EntityTally,
    energy: EnergyTotal,
    registry: RegistryCounts,
    host: &HostReading,
    now: DateTime<Utc>,
) -> CoreStats {
    let (uptime_days, uptime_hours) = uptime_from_boot(host.boot_time, now);

    CoreStats {
        total_entities: tally.total,
        total_devices: registry.devices,
        integrations_count: registry.integrations,
        disabled_entities: registry.disabled_entities,
        automation_count: tally.domain("automation"),
        script_count: tally.domain("script"),
        scene_count: tally.domain("scene"),
        light_count: tally.domain("light"),
        switch_count: tally.domain("switch"),
        sensor_count: tally.domain("sensor"),
        binary_sensor_count: tally.domain("binary_sensor"),
        person_count: tally.domain("person"),
        camera_count: tally.domain("camera"),
        media_player_count: tally.domain("media_player"),
        cover_count: tally.domain("cover"),
        climate_count: tally.domain("climate"),
        unique_domains_count: tally.unique_domains(),
        domain_counts: tally.domains.clone(),
        unavailable_count: tally.unavailable,
        unknown_count: tally.unknown,
        active_entities_24h: tally.active_24h,
        lights_on: tally.lights_on,
        uptime_days,
        uptime_hours,
        host_cpu_pct: host.cpu_pct,
        host_ram_pct: host.ram_pct,
        host_disk_pct: host.disk_pct,
        energy_kwh: energy.kwh,
        energy_entity_count: energy.contributing,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, TimeZone};
    use pretty_assertions::assert_eq;

    fn record(id: &str, state: &str) -> EntityRecord {
        EntityRecord {
            id: id.into(),
            state: state.to_owned(),
            friendly_name: None,
            unit_of_measurement: None,
            last_changed: None,
        }
    }

    #[test]
    fn assemble_merges_all_collaborators() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let entities = vec![
            record("light.a", "on"),
            record("automation.b", "on"),
            record("sensor.c", "unavailable"),
        ];
        let tally = tally_entities(&entities, now);
        let energy = EnergyTotal {
            kwh: 1.5,
            contributing: 1,
        };
        let registry = RegistryCounts {
            devices: 7,
            disabled_entities: 2,
            integrations: 3,
        };
        let host = HostReading {
            cpu_pct: Some(12.5),
            ram_pct: None,
            disk_pct: None,
            boot_time: Some(now - ChronoDuration::hours(30)),
        };

        let core = assemble_core(&tally, energy, registry, &host, now);

        assert_eq!(core.total_entities, 3);
        assert_eq!(core.total_devices, 7);
        assert_eq!(core.integrations_count, 3);
        assert_eq!(core.disabled_entities, 2);
        assert_eq!(core.automation_count, 1);
        assert_eq!(core.light_count, 1);
        assert_eq!(core.lights_on, 1);
        assert_eq!(core.unique_domains_count, 3);
        assert_eq!(core.unavailable_count, 1);
        assert_eq!(core.uptime_days, 1);
        assert_eq!(core.uptime_hours, 30.0);
        assert_eq!(core.host_cpu_pct, Some(12.5));
        assert_eq!(core.host_ram_pct, None);
        assert_eq!(core.energy_kwh, 1.5);
        assert_eq!(core.energy_entity_count, 1);
    }

    #[test]
    fn unreachable_collaborators_default_to_zero() {
        let now = Utc::now();
        let tally = tally_entities(&[], now);
        let core = assemble_core(
            &tally,
            EnergyTotal::default(),
            RegistryCounts::default(),
            &HostReading::default(),
            now,
        );

        assert_eq!(core.total_devices, 0);
        assert_eq!(core.uptime_days, 0);
        assert_eq!(core.uptime_hours, 0.0);
        assert_eq!(core.host_cpu_pct, None);
    }

    #[test]
    fn poll_interval_bounds() {
        assert!(!EngineConfig::poll_interval_valid(29));
        assert!(EngineConfig::poll_interval_valid(30));
        assert!(EngineConfig::poll_interval_valid(86_400));
        assert!(!EngineConfig::poll_interval_valid(86_401));
    }

    #[test]
    fn health_serializes_with_status_tag() {
        let failed = RefreshHealth::Failed {
            error: "boom".into(),
            last_good: None,
        };
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"], "boom");
        assert!(json.get("last_good").is_none());
    }
}
