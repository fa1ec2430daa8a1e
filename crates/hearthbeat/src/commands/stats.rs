//! `hearthbeat stats` — one-shot refresh, rendered to stdout.

use hearthbeat_core::StatsEngine;

use crate::cli::{GlobalOpts, StatsArgs};
use crate::commands::{build_client, effective_settings};
use crate::error::CliError;
use crate::output;

pub async fn handle(args: &StatsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut settings = effective_settings(global);
    if args.no_fun {
        settings.engine.enable_fun_stats = false;
    }
    if args.no_telemetry {
        settings.engine.enable_host_telemetry = false;
    }
    hearthbeat_config::validate(&settings)?;

    let client = build_client(&settings)?;
    let engine = StatsEngine::new(client, hearthbeat_config::engine_config(&settings));

    // One refresh, no tick task. Errors surface directly.
    let bundle = engine.refresh_now().await?;

    let rendered = output::render_bundle(&global.output, &bundle);
    output::print_output(&rendered, global.quiet);
    Ok(())
}
