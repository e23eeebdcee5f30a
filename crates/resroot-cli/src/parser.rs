//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for resolving logical resource paths.
#[derive(Debug, Parser)]
#[command(name = "resroot")]
#[command(about = "Resolve logical resource paths against layered resource roots")]
#[command(version)]
pub struct Cli {
    /// JSON resolver configuration file
    #[arg(long = "config", global = true, env = "RESROOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
