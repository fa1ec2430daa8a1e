//! Dashboard and JSON stats API.
//!
//! A small axum app over the engine's watch channels:
//!
//! - `GET /` — embedded single-page dashboard
//! - `GET /api/stats` — tile JSON keyed by sensor key
//! - `GET /healthz` — refresh health
//!
//! The app only ever reads the latest published bundle; it never
//! triggers a refresh.

mod tiles;

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

use hearthbeat_core::engine::RefreshHealth;
use hearthbeat_core::model::StatsBundle;

pub use tiles::stats_payload;

/// Embedded dashboard page.
const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Read-only handles into the engine.
#[derive(Clone)]
pub struct AppState {
    pub stats: watch::Receiver<Option<Arc<StatsBundle>>>,
    pub health: watch::Receiver<RefreshHealth>,
}

/// Build the dashboard router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/stats", get(api_stats))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn api_stats(State(state): State<AppState>) -> Json<serde_json::Value> {
    let bundle = state.stats.borrow().clone();
    Json(stats_payload(bundle.as_deref()))
}

async fn healthz(State(state): State<AppState>) -> Json<RefreshHealth> {
    Json(state.health.borrow().clone())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use chrono::Utc;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use hearthbeat_core::model::{CoreStats, FunStats};

    fn sample_bundle() -> Arc<StatsBundle> {
        Arc::new(StatsBundle {
            core: CoreStats {
                total_entities: 5,
                total_devices: 2,
                integrations_count: 1,
                disabled_entities: 0,
                automation_count: 0,
                script_count: 0,
                scene_count: 0,
                light_count: 1,
                switch_count: 0,
                sensor_count: 4,
                binary_sensor_count: 0,
                person_count: 0,
                camera_count: 0,
                media_player_count: 0,
                cover_count: 0,
                climate_count: 0,
                unique_domains_count: 2,
                domain_counts: IndexMap::from([
                    ("light".to_owned(), 1),
                    ("sensor".to_owned(), 4),
                ]),
                unavailable_count: 0,
                unknown_count: 0,
                active_entities_24h: 5,
                lights_on: 1,
                uptime_days: 1,
                uptime_hours: 30.0,
                host_cpu_pct: None,
                host_ram_pct: Some(40.0),
                host_disk_pct: None,
                energy_kwh: 2.5,
                energy_entity_count: 1,
            },
            fun: Some(FunStats {
                avg_entity_id_length: 12.0,
                longest_entity_id: "sensor.long".into(),
                shortest_entity_id: "light.a".into(),
                most_used_emoji: "💡".into(),
                emoji_density: 1.5,
                devices_named_after_pokemon: 1,
                most_redundant_name: "N/A".into(),
                names_with_numbers: 0,
                random_daily_quote: "quote".into(),
                house_mascot: "mascot".into(),
                everything_off: false,
            }),
            refreshed_at: Utc::now(),
        })
    }

    fn app(bundle: Option<Arc<StatsBundle>>, health: RefreshHealth) -> Router {
        // Receivers keep serving the last value after the senders drop.
        let (_stats_tx, stats_rx) = watch::channel(bundle);
        let (_health_tx, health_rx) = watch::channel(health);
        router(AppState {
            stats: stats_rx,
            health: health_rx,
        })
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap();
        (status, value)
    }

    #[tokio::test]
    async fn index_serves_the_dashboard() {
        let response = app(None, RefreshHealth::Pending)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("<!doctype html>") || html.contains("<!DOCTYPE html>"));
        assert!(html.contains("/api/stats"));
    }

    #[tokio::test]
    async fn api_stats_renders_tiles_from_the_bundle() {
        let bundle = sample_bundle();
        let (status, value) = get_json(
            app(Some(bundle), RefreshHealth::Ok { refreshed_at: Utc::now() }),
            "/api/stats",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let tile = &value["total_entities"];
        assert_eq!(tile["label"], "Total Entities");
        assert_eq!(tile["section"], "core");
        assert_eq!(tile["state"], 5);
        assert_eq!(tile["attributes"]["domain_breakdown"]["sensor"], 4);

        let energy = &value["energy_kwh"];
        assert_eq!(energy["state"], 2.5);
        assert_eq!(energy["attributes"]["contributing_sensors"], 1);

        let fun = &value["devices_named_after_pokemon"];
        assert_eq!(fun["section"], "fun");
        assert_eq!(fun["state"], 1);
    }

    #[tokio::test]
    async fn missing_values_render_as_unavailable() {
        let bundle = sample_bundle();
        let (_, value) = get_json(
            app(Some(bundle), RefreshHealth::Ok { refreshed_at: Utc::now() }),
            "/api/stats",
        )
        .await;

        // Disabled telemetry is null in the bundle → "unavailable" tile.
        assert_eq!(value["host_cpu_pct"]["state"], "unavailable");
        // Present telemetry passes through.
        assert_eq!(value["host_ram_pct"]["state"], 40.0);
    }

    #[tokio::test]
    async fn empty_cache_renders_every_tile_unavailable() {
        let (status, value) = get_json(app(None, RefreshHealth::Pending), "/api/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["total_entities"]["state"], "unavailable");
        assert_eq!(value["house_mascot"]["state"], "unavailable");
    }

    #[tokio::test]
    async fn healthz_reports_engine_state() {
        let (status, value) = get_json(app(None, RefreshHealth::Pending), "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["status"], "pending");

        let (_, value) = get_json(
            app(
                None,
                RefreshHealth::Failed {
                    error: "boom".into(),
                    last_good: None,
                },
            ),
            "/healthz",
        )
        .await;
        assert_eq!(value["status"], "failed");
        assert_eq!(value["error"], "boom");
    }
}
