//! Subcommand handlers.

pub mod config_cmd;
pub mod serve;
pub mod stats;

use hearthbeat_api::HubClient;
use hearthbeat_config::Settings;
use hearthbeat_core::CoreError;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Load settings and apply global CLI flag overrides.
pub(crate) fn effective_settings(global: &GlobalOpts) -> Settings {
    let mut settings = hearthbeat_config::load_settings_or_default();
    if let Some(ref url) = global.url {
        settings.hub.url = url.clone();
    }
    if let Some(ref token) = global.token {
        settings.hub.token = Some(token.clone());
    }
    if let Some(timeout) = global.timeout {
        settings.hub.timeout_secs = timeout;
    }
    settings
}

/// Build a hub client from validated settings.
pub(crate) fn build_client(settings: &Settings) -> Result<HubClient, CliError> {
    let config = hearthbeat_config::client_config(settings)?;
    HubClient::new(config).map_err(|e| CliError::from(CoreError::from(e)))
}
