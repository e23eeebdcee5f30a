//! Runtime bundle lookup.
//!
//! A runtime bundle maps logical paths straight to absolute paths, so roots
//! served by a bundle are trusted without a sentinel check.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::env::EnvProvider;

/// Environment variable naming a runfiles manifest file.
pub const RUNFILES_MANIFEST_FILE: &str = "RUNFILES_MANIFEST_FILE";

/// Environment variable naming a runfiles directory.
pub const RUNFILES_DIR: &str = "RUNFILES_DIR";

/// A packaged bundle that can map logical paths to absolute paths.
#[cfg_attr(test, mockall::automock)]
pub trait BundleManifest: Send + Sync {
    /// Whether bundle data is available for this process.
    fn is_available(&self) -> bool;

    /// Map a logical path to an existing absolute path, or explain why not.
    fn rlocation(&self, logical_path: &str) -> Result<PathBuf, String>;
}

/// Bundle provider for processes that have no bundle.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBundle;

impl BundleManifest for NoBundle {
    fn is_available(&self) -> bool {
        false
    }

    fn rlocation(&self, logical_path: &str) -> Result<PathBuf, String> {
        Err(format!("No runtime bundle is available to locate '{logical_path}'"))
    }
}

/// Runfiles-style bundle, backed by a manifest file or a directory tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Runfiles {
    /// `<logical> <absolute>` pairs read from a manifest file.
    Manifest {
        path: PathBuf,
        entries: HashMap<String, PathBuf>,
    },
    /// Logical paths resolve under a directory.
    Directory(PathBuf),
}

impl Runfiles {
    /// Discover runfiles from the environment.
    ///
    /// A manifest named by [`RUNFILES_MANIFEST_FILE`] wins over a directory
    /// named by [`RUNFILES_DIR`]. Returns `None` when neither is usable.
    pub fn from_env(env: &dyn EnvProvider) -> Option<Self> {
        if let Some(manifest) = env.get_non_empty(RUNFILES_MANIFEST_FILE) {
            let manifest = PathBuf::from(manifest);
            return match Self::from_manifest_file(&manifest) {
                Ok(runfiles) => Some(runfiles),
                Err(e) => {
                    tracing::debug!(
                        manifest = %manifest.display(),
                        error = %e,
                        "Ignoring unreadable runfiles manifest"
                    );
                    None
                }
            };
        }

        if let Some(dir) = env.get_non_empty(RUNFILES_DIR) {
            let dir = PathBuf::from(dir);
            if dir.is_dir() {
                return Some(Self::Directory(dir));
            }
            tracing::debug!(dir = %dir.display(), "Ignoring missing runfiles directory");
        }

        None
    }

    /// Read and parse a manifest file.
    pub fn from_manifest_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::parse_manifest(path, &contents))
    }

    /// Parse manifest text.
    ///
    /// Each non-blank line is `<logical> <absolute>`, split at the first space.
    /// A line with no space maps the logical path to itself.
    pub fn parse_manifest(path: impl Into<PathBuf>, contents: &str) -> Self {
        let entries = contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| match line.split_once(' ') {
                Some((logical, absolute)) => (logical.to_string(), PathBuf::from(absolute)),
                None => (line.to_string(), PathBuf::from(line)),
            })
            .collect();

        Self::Manifest {
            path: path.into(),
            entries,
        }
    }

    /// Use a directory tree as the bundle.
    pub fn from_directory(dir: impl Into<PathBuf>) -> Self {
        Self::Directory(dir.into())
    }
}

impl BundleManifest for Runfiles {
    fn is_available(&self) -> bool {
        true
    }

    /// Only regular files map; a directory is reported as not found.
    fn rlocation(&self, logical_path: &str) -> Result<PathBuf, String> {
        match self {
            Self::Manifest { path, entries } => {
                let Some(absolute) = entries.get(logical_path) else {
                    return Err(format!(
                        "Runfiles manifest '{}' has no entry for '{logical_path}'",
                        path.display()
                    ));
                };
                if absolute.is_file() {
                    Ok(absolute.clone())
                } else {
                    Err(format!(
                        "Runfiles manifest '{}' maps '{logical_path}' to '{}' but that file does not exist",
                        path.display(),
                        absolute.display()
                    ))
                }
            }
            Self::Directory(dir) => {
                let candidate = dir.join(logical_path);
                if candidate.is_file() {
                    Ok(candidate)
                } else {
                    Err(format!(
                        "Runfiles directory '{}' does not contain '{logical_path}'",
                        dir.display()
                    ))
                }
            }
        }
    }
}
