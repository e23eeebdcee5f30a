//! Shared helpers for resolution integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use resroot_core::DEFAULT_SENTINEL_RELPATH;
use resroot_core::ports::EnvProvider;
use tempfile::TempDir;

/// Serializes tests that read or write process environment variables.
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// RAII guard that restores an environment variable to its original value on drop.
pub struct EnvVarGuard {
    key: String,
    previous: Option<OsString>,
}

impl EnvVarGuard {
    #[allow(unsafe_code)]
    pub fn set(key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        let previous = env::var_os(key);
        unsafe {
            env::set_var(key, value);
        }
        Self {
            key: key.to_string(),
            previous,
        }
    }

    #[allow(unsafe_code)]
    pub fn unset(key: &str) -> Self {
        let previous = env::var_os(key);
        unsafe {
            env::remove_var(key);
        }
        Self {
            key: key.to_string(),
            previous,
        }
    }
}

impl Drop for EnvVarGuard {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        match &self.previous {
            Some(value) => unsafe { env::set_var(&self.key, value) },
            None => unsafe { env::remove_var(&self.key) },
        }
    }
}

/// Fixed set of environment variables.
#[derive(Default)]
pub struct MapEnv(HashMap<String, OsString>);

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_var(mut self, key: &str, value: impl Into<OsString>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }
}

impl EnvProvider for MapEnv {
    fn get(&self, key: &str) -> Option<OsString> {
        self.0.get(key).cloned()
    }
}

/// Temporary directory laid out as a resource root.
pub struct ResourceTree {
    dir: TempDir,
}

impl ResourceTree {
    /// An empty directory with no sentinel.
    pub fn bare() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    /// A directory carrying the default sentinel file.
    pub fn with_sentinel() -> Self {
        let tree = Self::bare();
        tree.add_file(DEFAULT_SENTINEL_RELPATH);
        tree
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, relpath: &str) -> PathBuf {
        self.dir.path().join(relpath)
    }

    pub fn add_file(&self, relpath: &str) -> PathBuf {
        let path = self.join(relpath);
        fs::create_dir_all(path.parent().expect("file has a parent")).expect("create parents");
        fs::write(&path, b"").expect("write file");
        path
    }

    pub fn add_dir(&self, relpath: &str) -> PathBuf {
        let path = self.join(relpath);
        fs::create_dir_all(&path).expect("create dir");
        path
    }
}
