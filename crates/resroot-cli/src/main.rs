//! CLI entry point.

use std::io;
use std::path::Path;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use resroot_cli::{Cli, CliError, Commands, handlers};

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(config: Option<&Path>, command: Commands) -> Result<(), CliError> {
    let resolver = handlers::build_resolver(config)?;
    let mut out = io::stdout().lock();

    match command {
        Commands::Find { paths, json } => {
            handlers::find::execute(&resolver, &paths, json, &mut out, &mut io::stderr())
        }
        Commands::Roots => handlers::roots::execute(&resolver, &mut out),
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if let Err(err) = run(cli.config.as_deref(), command) {
        if matches!(err, CliError::NotFound(_)) {
            tracing::debug!(%err, "Resolution failed");
        } else {
            eprintln!("Error: {err}");
        }
        std::process::exit(err.exit_code());
    }
    Ok(())
}
