//! Command-line interface for par-tabs.
//!
//! Parses global options and runs the `replay` and `print-config`
//! subcommands.

use crate::config::Config;
use crate::replay;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// par-tabs - Multi-session window controller for a tabbed terminal
#[derive(Parser)]
#[command(name = "par-tabs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file to use instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Set debug log level (overrides config and RUST_LOG)
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Drive a window controller from a YAML event script and print its state after each step
    Replay {
        /// Replay script
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,
    },

    /// Print the effective configuration as YAML
    PrintConfig,
}

/// Level from `RUST_LOG`, when it is a plain level name.
fn env_log_level() -> Option<log::LevelFilter> {
    std::env::var("RUST_LOG")
        .ok()
        .and_then(|value| value.trim().parse::<log::LevelFilter>().ok())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Config::load().context("Failed to load config"),
    }
}

/// Parse the command line and run the chosen subcommand.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // CLI flag first, then RUST_LOG; the config file decides only when neither is set
    let early_level = cli
        .log_level
        .map(LogLevelArg::to_level_filter)
        .or_else(env_log_level);
    crate::debug::init_log_bridge(early_level);

    let config = load_config(cli.config.as_deref())?;
    if early_level.is_none() {
        crate::debug::set_log_level(config.log_level.to_level_filter());
    }
    log::info!("Starting par-tabs {}", crate::VERSION);

    match cli.command {
        Commands::Replay { script } => {
            let snapshots = replay::replay_file(config, &script)
                .with_context(|| format!("Replay of {} failed", script.display()))?;
            let yaml = serde_yaml_ng::to_string(&snapshots)
                .context("Failed to serialize replay snapshots")?;
            print!("{yaml}");
        }
        Commands::PrintConfig => {
            let yaml = serde_yaml_ng::to_string(&config).context("Failed to serialize config")?;
            print!("{yaml}");
        }
    }
    Ok(())
}
