//! Command handlers.
//!
//! Handlers build output from a [`Resolver`] and write it to the given
//! writers; `main` owns process exit codes.

pub mod find;
pub mod roots;

use std::path::Path;

use resroot_core::{Resolver, ResolverConfig};

use crate::error::CliError;

/// Build a resolver from an optional JSON configuration file.
pub fn build_resolver(config_path: Option<&Path>) -> Result<Resolver, CliError> {
    let config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading resolver config");
            ResolverConfig::from_json_file(path)?
        }
        None => ResolverConfig::default(),
    };
    Ok(Resolver::new(config))
}
