//! Warn-once log for deprecated resource lookups.
//!
//! Requesting a directory instead of a file still resolves, but callers are
//! told to ask for a file inside it. The set of already-warned paths is owned
//! by whoever holds the log, so tests can use a fresh one or reset it.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock, Mutex};

use serde::{Deserialize, Serialize};

static PROCESS_LOG: LazyLock<Arc<DeprecationLog>> =
    LazyLock::new(|| Arc::new(DeprecationLog::new(WarnPolicy::Once)));

/// How often a deprecation is reported for the same resource path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnPolicy {
    /// Once per distinct resource path for the lifetime of the log.
    #[default]
    Once,
    /// Every time the deprecated lookup happens.
    Always,
}

/// Records which resource paths have already produced a deprecation warning.
#[derive(Debug, Default)]
pub struct DeprecationLog {
    policy: WarnPolicy,
    warned: Mutex<HashSet<String>>,
}

impl DeprecationLog {
    pub fn new(policy: WarnPolicy) -> Self {
        Self {
            policy,
            warned: Mutex::new(HashSet::new()),
        }
    }

    /// The log shared by the free `resolve` functions.
    pub fn process() -> Arc<Self> {
        Arc::clone(&PROCESS_LOG)
    }

    pub const fn policy(&self) -> WarnPolicy {
        self.policy
    }

    /// Warn that `resource_path` named a directory.
    ///
    /// Returns whether a warning was emitted.
    pub fn warn_directory(&self, resource_path: &str) -> bool {
        if !self.should_warn(resource_path) {
            return false;
        }
        tracing::warn!(
            resource_path,
            "Locating a directory (e.g., '{resource_path}') is deprecated. \
             Always request a file within the directory instead."
        );
        true
    }

    /// Whether `resource_path` has been warned about.
    pub fn has_warned(&self, resource_path: &str) -> bool {
        self.lock().contains(resource_path)
    }

    /// Forget every path warned about so far.
    pub fn reset(&self) {
        self.lock().clear();
    }

    fn should_warn(&self, resource_path: &str) -> bool {
        let first = self.lock().insert(resource_path.to_string());
        match self.policy {
            WarnPolicy::Once => first,
            WarnPolicy::Always => true,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        // The set stays consistent even if a holder panicked.
        self.warned
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
