//! Collaborator ports used by the resolver.
//!
//! Each OS primitive the resolver depends on sits behind a small trait so the
//! resolution algorithm can be exercised without touching the real process
//! environment or filesystem:
//! - `env`: environment variable access
//! - `fs`: directory and file existence checks
//! - `bundle`: runtime bundle (runfiles) lookup
//! - `marker`: install-tree marker location

mod bundle;
mod env;
mod fs;
mod marker;

pub use bundle::{BundleManifest, NoBundle, RUNFILES_DIR, RUNFILES_MANIFEST_FILE, Runfiles};
pub use env::{EnvProvider, SystemEnv};
pub use fs::{FsProvider, SystemFs};
pub use marker::{ExecutableMarker, FixedMarker, InstallMarker, LoadedLibraryMarker, NoMarker};

#[cfg(test)]
pub use bundle::MockBundleManifest;
#[cfg(test)]
pub use env::MockEnv;
#[cfg(test)]
pub use fs::MockFs;
#[cfg(test)]
pub use marker::MockInstallMarker;
