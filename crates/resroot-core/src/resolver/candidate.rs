//! Candidate root sources and probe outcomes.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::result::ResolutionResult;

/// A place a resource root can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    /// Directory named by the resource-root environment variable.
    EnvVar,
    /// Runtime bundle (runfiles) of the current process.
    Bundle,
    /// Share directory next to the install marker.
    InstallTree,
}

impl CandidateSource {
    /// Priority order used unless configured otherwise.
    pub const DEFAULT_ORDER: [Self; 3] = [Self::EnvVar, Self::Bundle, Self::InstallTree];
}

/// Outcome of probing one candidate source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootProbe {
    /// The source has no usable root; try the next one.
    NotApplicable,
    /// The source provided a root and the resolution is final.
    Resolved(ResolutionResult),
}

impl RootProbe {
    pub fn into_resolved(self) -> Option<ResolutionResult> {
        match self {
            Self::NotApplicable => None,
            Self::Resolved(result) => Some(result),
        }
    }
}

/// State of a candidate root, as reported by [`Resolver::candidates`](crate::Resolver::candidates).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    /// The source is not configured (variable unset, no bundle, no marker).
    Unset,
    /// The source names a root that does not exist.
    Missing,
    /// The root exists but lacks the sentinel file.
    NoSentinel,
    /// The root exists and carries the sentinel.
    Usable,
}

impl CandidateStatus {
    /// Whether resolution would stop at this candidate.
    pub const fn is_present(self) -> bool {
        matches!(self, Self::NoSentinel | Self::Usable)
    }
}

impl std::fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unset => write!(f, "unset"),
            Self::Missing => write!(f, "missing"),
            Self::NoSentinel => write!(f, "no sentinel"),
            Self::Usable => write!(f, "usable"),
        }
    }
}

/// Diagnostic view of one candidate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateReport {
    pub source: CandidateSource,
    pub description: String,
    pub root: Option<PathBuf>,
    pub status: CandidateStatus,
}

impl std::fmt::Display for CandidateReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.root {
            Some(root) => write!(
                f,
                "{} = {} ({})",
                self.description,
                root.display(),
                self.status
            ),
            None => write!(f, "{} = - ({})", self.description, self.status),
        }
    }
}
