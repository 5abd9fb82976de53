//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bdi-agent")]
#[command(about = "BDI agent - periodic belief/desire/intention control loop", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .bdi/config.yaml, else environment only)
    #[arg(short, long, global = true, env = "BDI_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the control loop until interrupted
    Run {
        /// Do not start the dashboard HTTP server
        #[arg(long)]
        no_dashboard: bool,
    },

    /// Run a single cycle and print what it observed and did
    Cycle,

    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration with credentials masked
    Show,
}
