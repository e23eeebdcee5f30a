//! Compatibility fallbacks for bundle lookups that miss.
//!
//! Both shims only apply to the runtime bundle: a root found any other way is
//! sentinel-validated and already accepts directories.

use std::path::{Path, PathBuf};

use crate::config::RelocationRule;
use crate::deprecation::DeprecationLog;
use crate::ports::{BundleManifest, FsProvider};

/// Root of the bundle, found by locating the sentinel and stripping its
/// relative suffix.
pub(super) fn bundle_root(
    bundle: &dyn BundleManifest,
    sentinel_relpath: &str,
) -> Result<PathBuf, String> {
    let sentinel = bundle.rlocation(sentinel_relpath)?;
    let relpath = Path::new(sentinel_relpath);
    if !sentinel.ends_with(relpath) {
        return Err(format!(
            "bundle sentinel '{}' does not end with '{sentinel_relpath}'",
            sentinel.display()
        ));
    }
    sentinel
        .ancestors()
        .nth(relpath.components().count())
        .map(Path::to_path_buf)
        .ok_or_else(|| format!("bundle sentinel '{}' has no root", sentinel.display()))
}

/// Accept a logical path naming a directory inside the bundle.
pub(super) fn legacy_directory(
    bundle: &dyn BundleManifest,
    fs: &dyn FsProvider,
    deprecations: &DeprecationLog,
    sentinel_relpath: &str,
    resource_path: &str,
) -> Option<PathBuf> {
    let root = match bundle_root(bundle, sentinel_relpath) {
        Ok(root) => root,
        Err(reason) => {
            tracing::debug!(resource_path, %reason, "Skipping legacy directory lookup");
            return None;
        }
    };

    let candidate = root.join(resource_path);
    if !fs.is_dir(&candidate) {
        return None;
    }
    deprecations.warn_directory(resource_path);
    Some(candidate)
}

/// Retry the bundle lookup under each relocated subtree that matches.
pub(super) fn relocated(
    bundle: &dyn BundleManifest,
    namespace_prefix: &str,
    rules: &[RelocationRule],
    resource_path: &str,
) -> Option<PathBuf> {
    let suffix = resource_path.strip_prefix(namespace_prefix)?;
    rules
        .iter()
        .filter(|rule| Path::new(suffix).starts_with(&rule.prefix))
        .find_map(|rule| {
            let moved = format!("{namespace_prefix}{}{suffix}", rule.relocated);
            match bundle.rlocation(&moved) {
                Ok(path) => Some(path),
                Err(reason) => {
                    tracing::debug!(resource_path, moved, %reason, "Relocated lookup missed");
                    None
                }
            }
        })
}
