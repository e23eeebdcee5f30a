//! Environment variables consulted while locating resource roots.
//!
//! The resolver reads the resource-root variable and the runfiles variables
//! through [`EnvProvider`], so tests can pin them without touching the
//! process environment.

use std::ffi::OsString;

/// Source of environment variables for root discovery.
pub trait EnvProvider: Send + Sync {
    /// Raw value of `key`, which may be empty or non-UTF-8.
    fn get(&self, key: &str) -> Option<OsString>;

    /// Value of `key`, treating an empty value as unset.
    fn get_non_empty(&self, key: &str) -> Option<OsString> {
        self.get(key).filter(|value| !value.is_empty())
    }
}

/// Reads the environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl EnvProvider for SystemEnv {
    fn get(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}

/// Fixed variable set for resolver tests.
#[cfg(test)]
#[derive(Default)]
pub struct MockEnv(std::collections::HashMap<String, OsString>);

#[cfg(test)]
impl MockEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, e.g. the resource-root variable, to `value`.
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
impl EnvProvider for MockEnv {
    fn get(&self, key: &str) -> Option<OsString> {
        self.0.get(key).cloned()
    }
}
