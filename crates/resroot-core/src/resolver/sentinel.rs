//! Sentinel validation of a candidate root.

use std::path::Path;

use super::is_relative_path;
use crate::deprecation::DeprecationLog;
use crate::ports::FsProvider;
use crate::result::ResolutionResult;

/// Treat `root` as the resource root, confirm it carries the sentinel, and
/// resolve `resource_path` against it.
///
/// # Panics
///
/// Panics if `root_description` is empty, `root` is empty, or
/// `resource_path` is not a non-empty relative path. Callers have already
/// seen `root` as a directory; that is re-checked in debug builds only, since
/// the directory can disappear between the two checks.
pub(super) fn check_and_make_result(
    fs: &dyn FsProvider,
    deprecations: &DeprecationLog,
    sentinel_relpath: &str,
    root_description: &str,
    root: &Path,
    resource_path: &str,
) -> ResolutionResult {
    assert!(!root_description.is_empty(), "root description must not be empty");
    assert!(!root.as_os_str().is_empty(), "root must not be empty");
    debug_assert!(
        fs.is_dir(root),
        "root '{}' must be an existing directory",
        root.display()
    );
    assert!(
        is_relative_path(resource_path),
        "resource path '{resource_path}' must be a relative path"
    );

    if !fs.is_file(&root.join(sentinel_relpath)) {
        return ResolutionResult::error(
            resource_path,
            format!(
                "Could not find resource path '{resource_path}' because {root_description} \
                 specified a resource root of '{}' but that root did not contain the expected \
                 sentinel file '{sentinel_relpath}'.",
                root.display()
            ),
        );
    }

    let abspath = root.join(resource_path);
    if fs.is_dir(&abspath) {
        deprecations.warn_directory(resource_path);
        return ResolutionResult::success(resource_path, abspath);
    }
    if !fs.is_file(&abspath) {
        return ResolutionResult::error(
            resource_path,
            format!(
                "Could not find resource path '{resource_path}' because {root_description} \
                 specified a resource root of '{}' but that root did not contain the expected \
                 file '{}'.",
                root.display(),
                abspath.display()
            ),
        );
    }

    ResolutionResult::success(resource_path, abspath)
}
