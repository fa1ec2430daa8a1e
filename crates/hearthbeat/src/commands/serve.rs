//! `hearthbeat serve` — run the engine and the dashboard until ctrl-c.

use tracing::{info, warn};

use hearthbeat_core::StatsEngine;
use hearthbeat_web::AppState;

use crate::cli::{GlobalOpts, ServeArgs};
use crate::commands::{build_client, effective_settings};
use crate::error::CliError;

pub async fn handle(args: &ServeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut settings = effective_settings(global);
    if let Some(interval) = args.interval {
        settings.engine.poll_interval_secs = interval;
    }
    if let Some(ref bind) = args.bind {
        settings.dashboard.bind = bind.clone();
    }
    if let Some(port) = args.port {
        settings.dashboard.port = port;
    }
    hearthbeat_config::validate(&settings)?;

    let client = build_client(&settings)?;

    // Pre-flight: surface connectivity problems before the first tick
    // logs them. Not fatal — the engine retries on its own schedule.
    match client.status().await {
        Ok(_) => {
            if let Ok(info) = client.instance_config().await {
                info!(
                    location = info.location_name.as_deref().unwrap_or("unknown"),
                    version = info.version.as_deref().unwrap_or("unknown"),
                    "connected to hub"
                );
            }
        }
        Err(e) => warn!(error = %e, "hub not reachable yet; the engine will keep retrying"),
    }

    let engine = StatsEngine::new(client, hearthbeat_config::engine_config(&settings));

    // First refresh happens inside start(); a failing hub is reported
    // through /healthz and retried on the next tick, not fatal here.
    engine.start().await;

    let app = hearthbeat_web::router(AppState {
        stats: engine.subscribe(),
        health: engine.health(),
    });

    let addr = format!("{}:{}", settings.dashboard.bind, settings.dashboard.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("dashboard listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    engine.shutdown().await;
    info!("shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("ctrl-c received, shutting down");
}
