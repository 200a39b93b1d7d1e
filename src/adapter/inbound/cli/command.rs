//! Command-line interface definitions.
//!
//! Defines the CLI structure for the tradefill application using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use crate::domain::request::Direction;

/// Fill on-chain order-book trades completely, one transaction at a time
#[derive(Parser, Debug)]
#[command(name = "tradefill")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fill a trade against the configured paper venue
    Run(RunArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `tradefill config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file for correctness.
    Validate(ConfigPathArg),
}

/// Config file location.
#[derive(Args, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for `tradefill run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Trade direction: buy or sell (0 or 1)
    #[arg(long)]
    pub direction: Direction,

    /// Market identifier
    #[arg(long)]
    pub market: String,

    /// Outcome index within the market
    #[arg(long)]
    pub outcome: u32,

    /// Shares to fill
    #[arg(long)]
    pub amount: Decimal,

    /// Limit price per share
    #[arg(long)]
    pub price: Decimal,

    /// Only match resting orders, never create one
    #[arg(long)]
    pub take_only: bool,

    /// Trade group identifier attached to every transaction
    #[arg(long, default_value = "0x0")]
    pub trade_group_id: String,

    /// Override the configured ticks per share
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub num_ticks: Option<u64>,

    /// Override the configured transaction limit
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_iterations: Option<u32>,
}
