//! Command-line argument parsing
//!
//! Supports:
//! - Replaying a scripted panel session
//! - Inspecting and editing the persisted panel size
//! - Printing or writing out the effective config

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use dockpanel::resize::Edge;

/// Headless tabbed panel driver
#[derive(Parser, Debug)]
#[command(name = "dockpanel", version, about = "Drive a headless tabbed panel")]
pub struct CliArgs {
    /// Config file (defaults to ~/.config/dockpanel/config.yaml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Storage file for persisted sizes (defaults to ~/.config/dockpanel/storage.json)
    #[arg(long, global = true, value_name = "FILE")]
    pub storage: Option<PathBuf>,

    /// Keep persisted sizes in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a YAML scenario and print the panel after every step
    Replay {
        /// Scenario file
        #[arg(value_name = "SCENARIO")]
        scenario: PathBuf,

        /// Override the resize edge from the config
        #[arg(long)]
        edge: Option<Edge>,

        /// Only print the final frame
        #[arg(short, long)]
        quiet: bool,
    },
    /// Show or change the persisted panel size
    Size {
        #[command(subcommand)]
        action: Option<SizeAction>,
    },
    /// Print the effective config as YAML
    Config {
        /// Also write it to the config file
        #[arg(long)]
        write: bool,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum SizeAction {
    /// Print the size (the default)
    Get,
    /// Persist a new size
    Set {
        #[arg(value_name = "PX", allow_negative_numbers = true)]
        value: i64,
    },
    /// Forget the persisted size
    Reset,
}
