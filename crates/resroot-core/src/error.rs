//! Error types for resource resolution and configuration.
//!
//! Recoverable resolution failures travel inside
//! [`ResolutionResult`](crate::ResolutionResult); these types cover the
//! `*_or_err` conversions and configuration loading.

use std::path::PathBuf;
use thiserror::Error;

/// Error raised when a resolution result is converted into a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    /// The resource could not be resolved; carries the diagnostic verbatim.
    #[error("{0}")]
    NotFound(String),
}

/// Errors that can occur while loading or validating a [`ResolverConfig`](crate::ResolverConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    /// The configuration file is not valid JSON for the config schema.
    #[error("Failed to parse config file {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// The configuration was parsed but violates a constraint.
    #[error("Invalid resolver config: {0}")]
    Invalid(String),
}
