//! Clap derive structures for the `hearthbeat` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// hearthbeat -- statistics engine and dashboard for a Home Assistant hub
#[derive(Debug, Parser)]
#[command(
    name = "hearthbeat",
    version,
    about = "Poll a Home Assistant hub and expose core/fun statistics",
    long_about = "Polls a Home Assistant instance on a fixed interval, computes a bundle\n\
        of descriptive statistics (entity counts, health, energy, host telemetry,\n\
        and a handful of whimsical extras), and serves them through a one-shot\n\
        CLI command or an embedded web dashboard.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Hub base URL (overrides the config file)
    #[arg(long, short = 'u', env = "HEARTHBEAT_URL", global = true)]
    pub url: Option<String>,

    /// Long-lived access token
    #[arg(long, env = "HEARTHBEAT_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds
    #[arg(long, env = "HEARTHBEAT_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Grouped tables (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the engine and serve the dashboard
    Serve(ServeArgs),

    /// Poll once and print the stats bundle
    Stats(StatsArgs),

    /// Manage the configuration file
    #[command(alias = "cfg")]
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Bind address (overrides dashboard.bind)
    #[arg(long)]
    pub bind: Option<String>,

    /// Port (overrides dashboard.port)
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Poll interval in seconds (30-86400)
    #[arg(long)]
    pub interval: Option<u64>,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Skip the fun aggregator
    #[arg(long)]
    pub no_fun: bool,

    /// Skip host telemetry (and its CPU sampling delay)
    #[arg(long)]
    pub no_telemetry: bool,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (token redacted)
    Show,

    /// Write a default config file
    Init,

    /// Print the config file path
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
