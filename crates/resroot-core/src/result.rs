//! Outcome of a single resource resolution.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ResourceError;

/// Message reported by an empty result, which no resolution produced.
pub const EMPTY_RESULT_MESSAGE: &str = "No resource was requested (empty result)";

/// The outcome of one resolution attempt.
///
/// A result is in exactly one of three states:
/// - *success*: a resource path and the absolute path it resolved to
/// - *error*: a resource path and a diagnostic explaining the failure
/// - *empty*: nothing was requested
///
/// Values are immutable and can only be built through [`success`](Self::success),
/// [`error`](Self::error) and [`empty`](Self::empty). Each of those, and every
/// accessor, checks the state invariant and panics if it is broken.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ResolutionResult {
    resource_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    absolute_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
}

impl ResolutionResult {
    /// Build a success result.
    ///
    /// # Panics
    ///
    /// Panics if either argument is empty.
    pub fn success(resource_path: impl Into<String>, absolute_path: impl Into<PathBuf>) -> Self {
        let resource_path = resource_path.into();
        let absolute_path = absolute_path.into();
        assert!(!resource_path.is_empty(), "resource_path must not be empty");
        assert!(
            !absolute_path.as_os_str().is_empty(),
            "absolute_path must not be empty"
        );

        let result = Self {
            resource_path,
            absolute_path: Some(absolute_path),
            error_message: None,
        };
        result.check_invariants();
        result
    }

    /// Build an error result.
    ///
    /// # Panics
    ///
    /// Panics if either argument is empty.
    pub fn error(resource_path: impl Into<String>, error_message: impl Into<String>) -> Self {
        let resource_path = resource_path.into();
        let error_message = error_message.into();
        assert!(!resource_path.is_empty(), "resource_path must not be empty");
        assert!(!error_message.is_empty(), "error_message must not be empty");

        let result = Self {
            resource_path,
            absolute_path: None,
            error_message: Some(error_message),
        };
        result.check_invariants();
        result
    }

    /// Build the empty result.
    pub fn empty() -> Self {
        let result = Self::default();
        result.check_invariants();
        result
    }

    /// The absolute path, if resolution succeeded.
    pub fn absolute_path(&self) -> Option<&Path> {
        self.check_invariants();
        self.absolute_path.as_deref()
    }

    /// The absolute path, or the diagnostic as an error.
    pub fn absolute_path_or_err(&self) -> Result<&Path, ResourceError> {
        self.check_invariants();
        if let Some(path) = self.absolute_path.as_deref() {
            return Ok(path);
        }
        let message = self
            .error_message()
            .unwrap_or(EMPTY_RESULT_MESSAGE)
            .to_string();
        Err(ResourceError::NotFound(message))
    }

    /// Consume the result, yielding the absolute path or the diagnostic as an error.
    pub fn into_absolute_path(self) -> Result<PathBuf, ResourceError> {
        self.absolute_path_or_err().map(Path::to_path_buf)
    }

    /// The diagnostic message.
    ///
    /// Returns `None` on success, the stored message on error, and
    /// [`EMPTY_RESULT_MESSAGE`] for the empty result.
    pub fn error_message(&self) -> Option<&str> {
        self.check_invariants();
        if let Some(message) = self.error_message.as_deref() {
            return Some(message);
        }
        if self.absolute_path.is_some() {
            return None;
        }
        Some(EMPTY_RESULT_MESSAGE)
    }

    /// The logical path that was requested (empty for the empty result).
    pub fn resource_path(&self) -> &str {
        self.check_invariants();
        &self.resource_path
    }

    pub fn is_success(&self) -> bool {
        self.check_invariants();
        self.absolute_path.is_some()
    }

    pub fn is_error(&self) -> bool {
        self.check_invariants();
        self.error_message.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.check_invariants();
        self.resource_path.is_empty()
    }

    fn check_invariants(&self) {
        if self.resource_path.is_empty() {
            assert!(
                self.absolute_path.is_none() && self.error_message.is_none(),
                "empty result must carry neither a path nor an error"
            );
        } else {
            assert!(
                self.absolute_path.is_none() != self.error_message.is_none(),
                "result for '{}' must carry exactly one of a path or an error",
                self.resource_path
            );
        }
        assert!(
            self.absolute_path
                .as_ref()
                .is_none_or(|p| !p.as_os_str().is_empty()),
            "absolute_path must not be empty when present"
        );
        assert!(
            self.error_message.as_ref().is_none_or(|m| !m.is_empty()),
            "error_message must not be empty when present"
        );
    }
}

impl std::fmt::Display for ResolutionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.absolute_path(), self.error_message()) {
            (Some(path), _) => write!(f, "{} = {}", self.resource_path, path.display()),
            (None, Some(message)) if !self.resource_path.is_empty() => {
                write!(f, "{}: {message}", self.resource_path)
            }
            (None, message) => write!(f, "{}", message.unwrap_or(EMPTY_RESULT_MESSAGE)),
        }
    }
}
