//! Filesystem provider trait for testable existence checks.

use std::path::Path;

/// Trait for filesystem queries (injectable for testing).
///
/// Both checks follow symlinks.
pub trait FsProvider: Send + Sync {
    /// Whether `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Whether `path` exists and is a regular file.
    fn is_file(&self, path: &Path) -> bool;
}

/// Production filesystem provider that uses real filesystem operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemFs;

impl FsProvider for SystemFs {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Test/mock filesystem provider with predefined entries.
///
/// Adding a file or directory also registers all of its ancestors as
/// directories.
#[cfg(test)]
#[derive(Default)]
pub struct MockFs {
    dirs: std::collections::HashSet<std::path::PathBuf>,
    files: std::collections::HashSet<std::path::PathBuf>,
}

#[cfg(test)]
impl MockFs {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_dir(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        let path = path.into();
        self.add_ancestors(&path);
        self.dirs.insert(path);
        self
    }

    #[must_use]
    pub fn with_file(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        let path = path.into();
        self.add_ancestors(&path);
        self.files.insert(path);
        self
    }

    fn add_ancestors(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            if !ancestor.as_os_str().is_empty() {
                self.dirs.insert(ancestor.to_path_buf());
            }
        }
    }
}

#[cfg(test)]
impl FsProvider for MockFs {
    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains(path)
    }
}
