//! Install-tree marker discovery.
//!
//! An installed tree is recognised by the location of a marker binary: the
//! resource root of an install lives next to it, under `<marker dir>/../share`.

use std::path::{Path, PathBuf};

/// Reports where the install marker lives on disk.
#[cfg_attr(test, mockall::automock)]
pub trait InstallMarker: Send + Sync {
    /// The directory containing the marker, or `None` if it is not present.
    fn location(&self) -> Option<PathBuf>;
}

/// No install marker; the install-tree candidate is always skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMarker;

impl InstallMarker for NoMarker {
    fn location(&self) -> Option<PathBuf> {
        None
    }
}

/// A marker at a known directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedMarker(pub PathBuf);

impl InstallMarker for FixedMarker {
    fn location(&self) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

/// Uses the running executable as the marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecutableMarker;

impl InstallMarker for ExecutableMarker {
    fn location(&self) -> Option<PathBuf> {
        let exe = std::env::current_exe().ok()?;
        exe.parent().map(Path::to_path_buf)
    }
}

/// Uses a shared library mapped into this process as the marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedLibraryMarker {
    library_name: String,
}

impl LoadedLibraryMarker {
    pub fn new(library_name: impl Into<String>) -> Self {
        Self {
            library_name: library_name.into(),
        }
    }

    pub fn library_name(&self) -> &str {
        &self.library_name
    }
}

impl InstallMarker for LoadedLibraryMarker {
    #[cfg(target_os = "linux")]
    fn location(&self) -> Option<PathBuf> {
        let maps = std::fs::read_to_string("/proc/self/maps").ok()?;
        find_mapped_library(&maps, &self.library_name)
    }

    #[cfg(not(target_os = "linux"))]
    fn location(&self) -> Option<PathBuf> {
        tracing::debug!(
            library = %self.library_name,
            "Loaded library lookup is only supported on Linux"
        );
        None
    }
}

/// Find the directory of a mapped file named `library_name` in `/proc/<pid>/maps` text.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn find_mapped_library(maps: &str, library_name: &str) -> Option<PathBuf> {
    maps.lines()
        .filter_map(|line| line.find('/').map(|start| Path::new(&line[start..])))
        .find(|path| path.file_name().is_some_and(|name| name == library_name))
        .and_then(Path::parent)
        .map(Path::to_path_buf)
}
