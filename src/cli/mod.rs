//! Command-line interface definitions.

pub mod check;
pub mod output;
pub mod run;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fillwatch - Relay Hyperliquid wallet activity to Telegram.
#[derive(Parser, Debug)]
#[command(name = "fillwatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Monitor the configured wallets (foreground)
    Run(RunArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `fillwatch check`
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate configuration file
    Config(ConfigPathArg),
    /// Test WebSocket connection to the venue
    Connection(ConfigPathArg),
    /// Send a Telegram test message
    Telegram(ConfigPathArg),
}

/// Shared argument for commands that only need a config path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,

    /// Log notifications instead of sending them
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_overrides() {
        let cli = Cli::try_parse_from([
            "fillwatch",
            "run",
            "-c",
            "custom.toml",
            "--log-level",
            "debug",
            "--json-logs",
            "--dry-run",
        ])
        .unwrap();
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.config, PathBuf::from("custom.toml"));
                assert_eq!(args.log_level.as_deref(), Some("debug"));
                assert!(args.json_logs);
                assert!(args.dry_run);
            }
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn check_defaults_to_config_toml() {
        let cli = Cli::try_parse_from(["fillwatch", "check", "config"]).unwrap();
        match cli.command {
            Commands::Check(CheckCommand::Config(arg)) => {
                assert_eq!(arg.config, PathBuf::from("config.toml"));
            }
            other => panic!("expected check config, got {other:?}"),
        }
    }
}
