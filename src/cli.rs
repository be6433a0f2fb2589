//! CLI definitions for Vigil.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Vigil CLI.
#[derive(Parser)]
#[command(name = "vigil")]
#[command(about = "Cluster-aware health monitoring and alerting engine")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        env = "VIGIL_CONFIG",
        default_value = "config/vigil.toml",
        global = true
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run monitor cycles on the configured interval (default)
    Run,

    /// Run a single monitor cycle and print its outcome
    Once {
        /// Also print events matching the `[events]` filter
        #[arg(long)]
        events: bool,
    },

    /// Validate the configuration file and exit
    Validate,
}
