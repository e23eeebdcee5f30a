//! Subcommands of the `resroot` tool.

use clap::Subcommand;

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve logical resource paths to absolute paths
    Find {
        /// Logical resource paths (e.g. "project/data/model.xml")
        #[arg(required = true)]
        paths: Vec<String>,
        /// Print one JSON resolution result per line
        #[arg(long)]
        json: bool,
    },

    /// Show every candidate resource root in search order
    Roots,
}
