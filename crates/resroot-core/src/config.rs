//! Resolver configuration and validation.
//!
//! The defaults describe the standard resource layout; a JSON file can
//! override any subset of fields.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::deprecation::WarnPolicy;
use crate::error::ConfigError;
use crate::resolver::CandidateSource;

/// Namespace every logical resource path starts with.
pub const DEFAULT_NAMESPACE_PREFIX: &str = "project/";

/// Environment variable naming an explicit resource root.
pub const DEFAULT_RESOURCE_ROOT_ENV: &str = "PROJECT_RESOURCE_ROOT";

/// Sentinel file every sentinel-validated root must contain, relative to the root.
pub const DEFAULT_SENTINEL_RELPATH: &str = "project/.resource-root-sentinel";

/// Install-tree resource root, relative to the install marker directory.
pub const DEFAULT_INSTALL_SHARE_RELPATH: &str = "../share";

/// A historical subtree that moved elsewhere in the bundle.
///
/// Logical paths whose namespace-relative part starts with `prefix` are
/// retried under `<namespace><relocated><rest of path>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelocationRule {
    /// Directory prefix (relative to the namespace) that was moved.
    pub prefix: String,
    /// Subtree the prefix now lives under, ending in `/`.
    pub relocated: String,
}

impl RelocationRule {
    pub fn new(prefix: impl Into<String>, relocated: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            relocated: relocated.into(),
        }
    }

    /// A rule for a directory moved into the `attic/` subtree.
    pub fn attic(prefix: impl Into<String>) -> Self {
        Self::new(prefix, "attic/")
    }
}

/// Configuration for [`Resolver`](crate::Resolver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Prefix every logical path must start with (ends in `/`).
    pub namespace_prefix: String,

    /// Environment variable consulted for the highest-priority root.
    pub env_var: String,

    /// Sentinel file a root must contain to be trusted.
    pub sentinel_relpath: String,

    /// Resource root relative to the install marker directory.
    pub install_share_relpath: String,

    /// Shared library used as install marker.
    pub marker_library: Option<String>,

    /// Use the running executable as install marker when no library is named.
    pub executable_marker: bool,

    /// Relocated subtrees retried when a bundle lookup misses.
    pub relocations: Vec<RelocationRule>,

    /// How often directory lookups are reported as deprecated.
    pub warn_policy: WarnPolicy,

    /// Order in which candidate roots are tried.
    pub candidate_order: Vec<CandidateSource>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            namespace_prefix: DEFAULT_NAMESPACE_PREFIX.to_string(),
            env_var: DEFAULT_RESOURCE_ROOT_ENV.to_string(),
            sentinel_relpath: DEFAULT_SENTINEL_RELPATH.to_string(),
            install_share_relpath: DEFAULT_INSTALL_SHARE_RELPATH.to_string(),
            marker_library: None,
            executable_marker: false,
            relocations: Vec::new(),
            warn_policy: WarnPolicy::Once,
            candidate_order: CandidateSource::DEFAULT_ORDER.to_vec(),
        }
    }
}

impl ResolverConfig {
    /// Load a configuration from a JSON file and validate it.
    ///
    /// Fields missing from the file keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_relocation(mut self, rule: RelocationRule) -> Self {
        self.relocations.push(rule);
        self
    }

    #[must_use]
    pub fn with_candidate_order(mut self, order: impl Into<Vec<CandidateSource>>) -> Self {
        self.candidate_order = order.into();
        self
    }

    #[must_use]
    pub const fn with_warn_policy(mut self, policy: WarnPolicy) -> Self {
        self.warn_policy = policy;
        self
    }

    /// Check the configuration for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_config(self)
    }
}

/// Validate a resolver configuration.
pub fn validate_config(config: &ResolverConfig) -> Result<(), ConfigError> {
    let prefix = &config.namespace_prefix;
    if prefix.is_empty() || !prefix.ends_with('/') || prefix.starts_with('/') {
        return Err(ConfigError::Invalid(format!(
            "namespace_prefix must be a relative directory ending in '/', got '{prefix}'"
        )));
    }

    if config.env_var.trim().is_empty() {
        return Err(ConfigError::Invalid("env_var must not be empty".to_string()));
    }

    let sentinel = &config.sentinel_relpath;
    if sentinel.is_empty() || PathBuf::from(sentinel).is_absolute() || !sentinel.starts_with(prefix.as_str()) {
        return Err(ConfigError::Invalid(format!(
            "sentinel_relpath must be a relative path under '{prefix}', got '{sentinel}'"
        )));
    }

    if config.install_share_relpath.is_empty() {
        return Err(ConfigError::Invalid(
            "install_share_relpath must not be empty".to_string(),
        ));
    }

    if config.marker_library.as_deref().is_some_and(str::is_empty) {
        return Err(ConfigError::Invalid(
            "marker_library must not be empty when set".to_string(),
        ));
    }

    if config.candidate_order.is_empty() {
        return Err(ConfigError::Invalid(
            "candidate_order must name at least one source".to_string(),
        ));
    }
    let mut seen = HashSet::new();
    for source in &config.candidate_order {
        if !seen.insert(source) {
            return Err(ConfigError::Invalid(format!(
                "candidate_order lists {source:?} more than once"
            )));
        }
    }

    for rule in &config.relocations {
        if rule.prefix.is_empty() {
            return Err(ConfigError::Invalid(
                "relocation prefix must not be empty".to_string(),
            ));
        }
        if rule.relocated.is_empty() || !rule.relocated.ends_with('/') {
            return Err(ConfigError::Invalid(format!(
                "relocation target for '{}' must end in '/', got '{}'",
                rule.prefix, rule.relocated
            )));
        }
    }

    Ok(())
}
