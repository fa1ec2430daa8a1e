//! `hearthbeat config` — show, init, and locate the config file.

use hearthbeat_config::Settings;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::commands::effective_settings;
use crate::error::CliError;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => show(global),
        ConfigCommand::Init => init(global.quiet),
        ConfigCommand::Path => {
            println!("{}", hearthbeat_config::config_path().display());
            Ok(())
        }
    }
}

fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let mut settings = effective_settings(global);
    if settings.hub.token.is_some() {
        settings.hub.token = Some("<redacted>".into());
    }
    let rendered = toml::to_string_pretty(&settings).map_err(|e| CliError::Config(e.to_string()))?;
    println!("{rendered}");
    Ok(())
}

fn init(quiet: bool) -> Result<(), CliError> {
    let path = hearthbeat_config::config_path();
    if path.exists() {
        return Err(CliError::ConfigExists {
            path: path.display().to_string(),
        });
    }

    let written = hearthbeat_config::save_settings(&Settings::default())?;
    if !quiet {
        println!("wrote default config to {}", written.display());
    }
    Ok(())
}
