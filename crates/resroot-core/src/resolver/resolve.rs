//! Main resolution logic and orchestration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::candidate::{CandidateReport, CandidateSource, CandidateStatus, RootProbe};
use super::{is_relative_path, sentinel, shims};
use crate::config::ResolverConfig;
use crate::deprecation::DeprecationLog;
use crate::error::ResourceError;
use crate::ports::{
    BundleManifest, EnvProvider, ExecutableMarker, FsProvider, InstallMarker,
    LoadedLibraryMarker, NoBundle, NoMarker, Runfiles, SystemEnv, SystemFs,
};
use crate::result::ResolutionResult;

const BUNDLE_DESCRIPTION: &str = "runtime bundle";
const INSTALL_MARKER_DESCRIPTION: &str = "install marker";

/// Resolve a logical resource path using the process environment.
///
/// Builds a fresh [`Resolver::from_env`] for every call; nothing is cached.
///
/// # Panics
///
/// Panics if `resource_path` is empty.
pub fn resolve(resource_path: &str) -> ResolutionResult {
    Resolver::from_env().resolve(resource_path)
}

/// Resolve a logical resource path, returning the diagnostic as an error on failure.
pub fn resolve_or_fail(resource_path: &str) -> Result<PathBuf, ResourceError> {
    resolve(resource_path).into_absolute_path()
}

/// Resolves logical resource paths against an ordered list of candidate roots.
///
/// Search order (configurable through [`ResolverConfig::candidate_order`]):
/// 1. Directory named by the resource-root environment variable
/// 2. Runtime bundle of the current process
/// 3. Share directory next to the install marker
///
/// The first root that exists is used even if it lacks the requested
/// resource; every root is expected to carry the complete resource set.
pub struct Resolver {
    config: ResolverConfig,
    env: Box<dyn EnvProvider>,
    fs: Box<dyn FsProvider>,
    bundle: Box<dyn BundleManifest>,
    marker: Box<dyn InstallMarker>,
    deprecations: Arc<DeprecationLog>,
}

impl Resolver {
    /// Build a resolver wired to the real process environment and filesystem.
    ///
    /// The runtime bundle is discovered from the runfiles environment
    /// variables. The install marker is the configured library, else the
    /// running executable when `executable_marker` is set, else none. The
    /// resolver gets its own deprecation log.
    pub fn new(config: ResolverConfig) -> Self {
        let bundle: Box<dyn BundleManifest> = match Runfiles::from_env(&SystemEnv) {
            Some(runfiles) => Box::new(runfiles),
            None => Box::new(NoBundle),
        };
        let marker = configured_marker(&config);
        let deprecations = Arc::new(DeprecationLog::new(config.warn_policy));

        Self {
            config,
            env: Box::new(SystemEnv),
            fs: Box::new(SystemFs),
            bundle,
            marker,
            deprecations,
        }
    }

    /// Default configuration, system collaborators, and the process-wide deprecation log.
    pub fn from_env() -> Self {
        Self::new(ResolverConfig::default()).with_deprecation_log(DeprecationLog::process())
    }

    #[must_use]
    pub fn with_env(mut self, env: impl EnvProvider + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    #[must_use]
    pub fn with_fs(mut self, fs: impl FsProvider + 'static) -> Self {
        self.fs = Box::new(fs);
        self
    }

    #[must_use]
    pub fn with_bundle(mut self, bundle: impl BundleManifest + 'static) -> Self {
        self.bundle = Box::new(bundle);
        self
    }

    #[must_use]
    pub fn with_marker(mut self, marker: impl InstallMarker + 'static) -> Self {
        self.marker = Box::new(marker);
        self
    }

    #[must_use]
    pub fn with_deprecation_log(mut self, log: Arc<DeprecationLog>) -> Self {
        self.deprecations = log;
        self
    }

    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn deprecation_log(&self) -> &Arc<DeprecationLog> {
        &self.deprecations
    }

    /// Resolve a logical resource path.
    ///
    /// Malformed paths and unresolvable resources produce an error result.
    ///
    /// # Panics
    ///
    /// Panics if `resource_path` is empty.
    pub fn resolve(&self, resource_path: &str) -> ResolutionResult {
        assert!(!resource_path.is_empty(), "resource path must not be empty");
        if !is_relative_path(resource_path) {
            return ResolutionResult::error(
                resource_path,
                format!("Resource path '{resource_path}' is not a relative path."),
            );
        }
        let prefix = &self.config.namespace_prefix;
        if !resource_path.starts_with(prefix.as_str()) {
            return ResolutionResult::error(
                resource_path,
                format!("Resource path '{resource_path}' does not start with {prefix}."),
            );
        }

        self.config
            .candidate_order
            .iter()
            .find_map(|&source| self.probe(source, resource_path).into_resolved())
            .unwrap_or_else(|| self.no_roots_error(resource_path))
    }

    /// Resolve a logical resource path, returning the diagnostic as an error on failure.
    pub fn resolve_or_fail(&self, resource_path: &str) -> Result<PathBuf, ResourceError> {
        self.resolve(resource_path).into_absolute_path()
    }

    /// Probe a single candidate source.
    pub fn probe(&self, source: CandidateSource, resource_path: &str) -> RootProbe {
        match source {
            CandidateSource::EnvVar => self.probe_env_var(resource_path),
            CandidateSource::Bundle => self.probe_bundle(resource_path),
            CandidateSource::InstallTree => self.probe_install_tree(resource_path),
        }
    }

    /// Describe every candidate root in search order, without resolving anything.
    pub fn candidates(&self) -> Vec<CandidateReport> {
        self.config
            .candidate_order
            .iter()
            .map(|&source| self.report(source))
            .collect()
    }

    fn probe_env_var(&self, resource_path: &str) -> RootProbe {
        let Some(root) = self.env_root() else {
            return RootProbe::NotApplicable;
        };
        if !self.fs.is_dir(&root) {
            tracing::debug!(
                env_var = %self.config.env_var,
                root = %root.display(),
                "Ignoring resource root because it does not exist"
            );
            return RootProbe::NotApplicable;
        }
        RootProbe::Resolved(self.check_root(&self.env_description(), &root, resource_path))
    }

    fn probe_bundle(&self, resource_path: &str) -> RootProbe {
        if !self.bundle.is_available() {
            return RootProbe::NotApplicable;
        }

        let lookup_error = match self.bundle.rlocation(resource_path) {
            Ok(path) => return RootProbe::Resolved(ResolutionResult::success(resource_path, path)),
            Err(e) => e,
        };

        if let Some(dir) = shims::legacy_directory(
            self.bundle.as_ref(),
            self.fs.as_ref(),
            &self.deprecations,
            &self.config.sentinel_relpath,
            resource_path,
        ) {
            return RootProbe::Resolved(ResolutionResult::success(resource_path, dir));
        }

        if let Some(path) = shims::relocated(
            self.bundle.as_ref(),
            &self.config.namespace_prefix,
            &self.config.relocations,
            resource_path,
        ) {
            return RootProbe::Resolved(ResolutionResult::success(resource_path, path));
        }

        let message = if lookup_error.is_empty() {
            format!("Could not find resource path '{resource_path}' in the {BUNDLE_DESCRIPTION}.")
        } else {
            lookup_error
        };
        RootProbe::Resolved(ResolutionResult::error(resource_path, message))
    }

    fn probe_install_tree(&self, resource_path: &str) -> RootProbe {
        let Some(root) = self.install_root() else {
            tracing::debug!("No install marker candidate");
            return RootProbe::NotApplicable;
        };
        if !self.fs.is_dir(&root) {
            tracing::debug!(
                root = %root.display(),
                "Ignoring install marker candidate because it does not exist"
            );
            return RootProbe::NotApplicable;
        }
        RootProbe::Resolved(self.check_root(INSTALL_MARKER_DESCRIPTION, &root, resource_path))
    }

    fn check_root(&self, description: &str, root: &Path, resource_path: &str) -> ResolutionResult {
        sentinel::check_and_make_result(
            self.fs.as_ref(),
            &self.deprecations,
            &self.config.sentinel_relpath,
            description,
            root,
            resource_path,
        )
    }

    fn no_roots_error(&self, resource_path: &str) -> ResolutionResult {
        ResolutionResult::error(
            resource_path,
            format!(
                "Could not find resource path '{resource_path}' because no resource roots of \
                 any kind could be found: {} is unset, a {BUNDLE_DESCRIPTION} could not be \
                 created, and there is no {INSTALL_MARKER_DESCRIPTION}.",
                self.config.env_var
            ),
        )
    }

    fn report(&self, source: CandidateSource) -> CandidateReport {
        match source {
            CandidateSource::EnvVar => {
                let root = self.env_root();
                let status = self.directory_status(root.as_deref());
                CandidateReport {
                    source,
                    description: self.env_description(),
                    root,
                    status,
                }
            }
            CandidateSource::Bundle => {
                let (root, status) = if !self.bundle.is_available() {
                    (None, CandidateStatus::Unset)
                } else {
                    match shims::bundle_root(self.bundle.as_ref(), &self.config.sentinel_relpath) {
                        Ok(root) => (Some(root), CandidateStatus::Usable),
                        Err(_) => (None, CandidateStatus::NoSentinel),
                    }
                };
                CandidateReport {
                    source,
                    description: BUNDLE_DESCRIPTION.to_string(),
                    root,
                    status,
                }
            }
            CandidateSource::InstallTree => {
                let root = self.install_root();
                let status = self.directory_status(root.as_deref());
                CandidateReport {
                    source,
                    description: INSTALL_MARKER_DESCRIPTION.to_string(),
                    root,
                    status,
                }
            }
        }
    }

    fn directory_status(&self, root: Option<&Path>) -> CandidateStatus {
        match root {
            None => CandidateStatus::Unset,
            Some(root) if !self.fs.is_dir(root) => CandidateStatus::Missing,
            Some(root) if !self.fs.is_file(&root.join(&self.config.sentinel_relpath)) => {
                CandidateStatus::NoSentinel
            }
            Some(_) => CandidateStatus::Usable,
        }
    }

    /// Root named by the environment variable, made absolute against the current directory.
    fn env_root(&self) -> Option<PathBuf> {
        let raw = PathBuf::from(self.env.get(&self.config.env_var)?);
        if raw.as_os_str().is_empty() || raw.is_absolute() {
            return Some(raw);
        }
        Some(std::path::absolute(&raw).unwrap_or(raw))
    }

    fn install_root(&self) -> Option<PathBuf> {
        self.marker
            .location()
            .map(|dir| dir.join(&self.config.install_share_relpath))
    }

    fn env_description(&self) -> String {
        format!("{} environment variable", self.config.env_var)
    }
}

fn configured_marker(config: &ResolverConfig) -> Box<dyn InstallMarker> {
    match &config.marker_library {
        Some(name) => Box::new(LoadedLibraryMarker::new(name.clone())),
        None if config.executable_marker => Box::new(ExecutableMarker),
        None => Box::new(NoMarker),
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("config", &self.config)
            .field("deprecations", &self.deprecations)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RelocationRule;
    use crate::deprecation::WarnPolicy;
    use crate::ports::{FixedMarker, MockBundleManifest, MockEnv, MockFs, MockInstallMarker};
    use mockall::predicate::eq;

    const ENV: &str = "PROJECT_RESOURCE_ROOT";

    fn resolver(env: MockEnv, fs: MockFs) -> Resolver {
        Resolver::new(ResolverConfig::default())
            .with_env(env)
            .with_fs(fs)
            .with_bundle(NoBundle)
            .with_marker(NoMarker)
    }

    fn valid_root(root: &str) -> MockFs {
        MockFs::new().with_file(format!("{root}/project/.resource-root-sentinel"))
    }

    #[test]
    fn rejects_absolute_path() {
        let result = resolver(MockEnv::new(), MockFs::new()).resolve("/etc/passwd");

        assert_eq!(
            result.error_message(),
            Some("Resource path '/etc/passwd' is not a relative path.")
        );
    }

    #[test]
    fn rejects_path_outside_namespace() {
        let result = resolver(MockEnv::new(), MockFs::new()).resolve("other/data/x.txt");

        let message = result.error_message().unwrap();
        assert!(message.contains("other/data/x.txt"), "{message}");
        assert!(message.contains("does not start with project/."), "{message}");
    }

    #[test]
    #[should_panic(expected = "resource path must not be empty")]
    fn empty_path_is_fatal() {
        let _ = resolver(MockEnv::new(), MockFs::new()).resolve("");
    }

    #[test]
    fn default_config_has_no_install_marker() {
        let resolver = Resolver::new(ResolverConfig::default())
            .with_env(MockEnv::new())
            .with_fs(MockFs::new().with_dir("/usr/local/share"))
            .with_bundle(NoBundle);

        let result = resolver.resolve("project/data/x.txt");

        let message = result.error_message().unwrap();
        assert!(message.contains("no resource roots of any kind could be found"), "{message}");
        assert_eq!(
            resolver.report(CandidateSource::InstallTree).status,
            CandidateStatus::Unset
        );
    }

    #[test]
    fn executable_marker_is_opt_in() {
        let config = ResolverConfig {
            executable_marker: true,
            ..ResolverConfig::default()
        };
        let marker = configured_marker(&config).location();
        assert_eq!(marker, ExecutableMarker.location());
        assert!(marker.is_some());

        assert_eq!(configured_marker(&ResolverConfig::default()).location(), None);
    }

    #[test]
    fn env_root_resolves_file() {
        let env = MockEnv::new().with_var(ENV, "/tmp/fakeroot");
        let fs = valid_root("/tmp/fakeroot").with_file("/tmp/fakeroot/project/data/x.txt");

        let result = resolver(env, fs).resolve("project/data/x.txt");

        assert_eq!(
            result.absolute_path(),
            Some(Path::new("/tmp/fakeroot/project/data/x.txt"))
        );
        assert_eq!(result.resource_path(), "project/data/x.txt");
    }

    #[test]
    fn env_root_without_sentinel_is_an_error() {
        let env = MockEnv::new().with_var(ENV, "/tmp/fakeroot");
        let fs = MockFs::new().with_file("/tmp/fakeroot/project/data/x.txt");

        let result = resolver(env, fs).resolve("project/data/x.txt");

        let message = result.error_message().unwrap();
        assert!(message.contains("PROJECT_RESOURCE_ROOT environment variable"), "{message}");
        assert!(message.contains("project/.resource-root-sentinel"), "{message}");
    }

    #[test]
    fn env_root_short_circuits_even_when_resource_missing() {
        let env = MockEnv::new().with_var(ENV, "/env");
        let fs = valid_root("/env")
            .with_file("/opt/share/project/.resource-root-sentinel")
            .with_file("/opt/share/project/data/x.txt");

        let result = resolver(env, fs)
            .with_marker(FixedMarker(PathBuf::from("/opt/bin")))
            .resolve("project/data/x.txt");

        assert!(result.is_error());
        assert!(result.error_message().unwrap().contains("expected file '/env/project/data/x.txt'"));
    }

    #[test]
    fn env_root_that_is_not_a_directory_is_skipped() {
        let env = MockEnv::new().with_var(ENV, "/missing");
        let fs = MockFs::new()
            .with_dir("/opt/bin")
            .with_file("/opt/bin/../share/project/.resource-root-sentinel")
            .with_file("/opt/bin/../share/project/data/x.txt");

        let result = resolver(env, fs)
            .with_marker(FixedMarker(PathBuf::from("/opt/bin")))
            .resolve("project/data/x.txt");

        assert_eq!(
            result.absolute_path(),
            Some(Path::new("/opt/bin/../share/project/data/x.txt"))
        );
    }

    #[test]
    fn relative_env_root_is_made_absolute() {
        let env = MockEnv::new().with_var(ENV, "relative/root");
        let resolver = resolver(env, MockFs::new());

        let root = resolver.env_root().unwrap();
        assert!(root.is_absolute());
        assert!(root.ends_with("relative/root"));
    }

    #[test]
    fn bundle_hit_skips_sentinel_check() {
        let mut bundle = MockBundleManifest::new();
        bundle.expect_is_available().return_const(true);
        bundle
            .expect_rlocation()
            .with(eq("project/data/x.txt"))
            .returning(|_| Ok(PathBuf::from("/bundle/project/data/x.txt")));

        let result = resolver(MockEnv::new(), MockFs::new())
            .with_bundle(bundle)
            .resolve("project/data/x.txt");

        assert_eq!(
            result.absolute_path(),
            Some(Path::new("/bundle/project/data/x.txt"))
        );
    }

    #[test]
    fn bundle_miss_reports_lookup_error() {
        let mut bundle = MockBundleManifest::new();
        bundle.expect_is_available().return_const(true);
        bundle
            .expect_rlocation()
            .returning(|p| Err(format!("manifest has no entry for '{p}'")));

        let result = resolver(MockEnv::new(), MockFs::new())
            .with_bundle(bundle)
            .resolve("project/data/x.txt");

        assert_eq!(
            result.error_message(),
            Some("manifest has no entry for 'project/data/x.txt'")
        );
    }

    #[test]
    fn bundle_miss_falls_back_to_legacy_directory() {
        let mut bundle = MockBundleManifest::new();
        bundle.expect_is_available().return_const(true);
        bundle.expect_rlocation().returning(|p| {
            if p == "project/.resource-root-sentinel" {
                Ok(PathBuf::from("/bundle/project/.resource-root-sentinel"))
            } else {
                Err(format!("no entry for '{p}'"))
            }
        });
        let fs = MockFs::new().with_dir("/bundle/project/models");
        let log = Arc::new(DeprecationLog::new(WarnPolicy::Once));

        let result = resolver(MockEnv::new(), fs)
            .with_bundle(bundle)
            .with_deprecation_log(Arc::clone(&log))
            .resolve("project/models");

        assert_eq!(result.absolute_path(), Some(Path::new("/bundle/project/models")));
        assert!(log.has_warned("project/models"));
    }

    #[test]
    fn bundle_miss_falls_back_to_relocated_subtree() {
        let mut bundle = MockBundleManifest::new();
        bundle.expect_is_available().return_const(true);
        bundle.expect_rlocation().returning(|p| {
            if p == "project/attic/models/test/a.urdf" {
                Ok(PathBuf::from("/bundle/project/attic/models/test/a.urdf"))
            } else {
                Err(format!("no entry for '{p}'"))
            }
        });
        let config = ResolverConfig::default().with_relocation(RelocationRule::attic("models/test"));

        let result = Resolver::new(config)
            .with_env(MockEnv::new())
            .with_fs(MockFs::new())
            .with_bundle(bundle)
            .with_marker(NoMarker)
            .resolve("project/models/test/a.urdf");

        assert_eq!(
            result.absolute_path(),
            Some(Path::new("/bundle/project/attic/models/test/a.urdf"))
        );
        assert_eq!(result.resource_path(), "project/models/test/a.urdf");
    }

    #[test]
    fn install_tree_resolves_under_share() {
        let mut marker = MockInstallMarker::new();
        marker
            .expect_location()
            .returning(|| Some(PathBuf::from("/usr/lib")));
        let fs = MockFs::new()
            .with_dir("/usr/lib/../share")
            .with_file("/usr/lib/../share/project/.resource-root-sentinel")
            .with_file("/usr/lib/../share/project/data/x.txt");

        let result = resolver(MockEnv::new(), fs)
            .with_marker(marker)
            .resolve("project/data/x.txt");

        assert_eq!(
            result.absolute_path(),
            Some(Path::new("/usr/lib/../share/project/data/x.txt"))
        );
    }

    #[test]
    fn install_tree_without_share_reports_no_roots() {
        let fs = MockFs::new().with_dir("/usr/lib");

        let result = resolver(MockEnv::new(), fs)
            .with_marker(FixedMarker(PathBuf::from("/usr/lib")))
            .resolve("project/data/x.txt");

        let message = result.error_message().unwrap();
        assert!(message.contains("no resource roots of any kind could be found"), "{message}");
        assert!(message.contains("PROJECT_RESOURCE_ROOT is unset"), "{message}");
        assert!(message.contains("'project/data/x.txt'"), "{message}");
    }

    #[test]
    fn candidate_order_is_configurable() {
        let mut bundle = MockBundleManifest::new();
        bundle.expect_is_available().return_const(true);
        bundle
            .expect_rlocation()
            .returning(|_| Ok(PathBuf::from("/bundle/project/data/x.txt")));
        let env = MockEnv::new().with_var(ENV, "/env");
        let fs = valid_root("/env").with_file("/env/project/data/x.txt");
        let config = ResolverConfig::default()
            .with_candidate_order([CandidateSource::Bundle, CandidateSource::EnvVar]);

        let result = Resolver::new(config)
            .with_env(env)
            .with_fs(fs)
            .with_bundle(bundle)
            .with_marker(NoMarker)
            .resolve("project/data/x.txt");

        assert_eq!(
            result.absolute_path(),
            Some(Path::new("/bundle/project/data/x.txt"))
        );
    }

    #[test]
    fn resolve_or_fail_carries_message_verbatim() {
        let err = resolver(MockEnv::new(), MockFs::new())
            .resolve_or_fail("other/x")
            .unwrap_err();
        assert_eq!(
            err,
            ResourceError::NotFound("Resource path 'other/x' does not start with project/.".to_string())
        );
    }

    #[test]
    fn candidates_report_each_source() {
        let env = MockEnv::new().with_var(ENV, "/env");
        let fs = valid_root("/env").with_dir("/usr/lib");
        let resolver = resolver(env, fs).with_marker(FixedMarker(PathBuf::from("/usr/lib")));

        let reports = resolver.candidates();

        let statuses: Vec<_> = reports.iter().map(|r| (r.source, r.status)).collect();
        assert_eq!(
            statuses,
            vec![
                (CandidateSource::EnvVar, CandidateStatus::Usable),
                (CandidateSource::Bundle, CandidateStatus::Unset),
                (CandidateSource::InstallTree, CandidateStatus::Missing),
            ]
        );
        assert_eq!(reports[0].root, Some(PathBuf::from("/env")));
        assert_eq!(reports[2].root, Some(PathBuf::from("/usr/lib/../share")));
    }

    #[test]
    fn bundle_candidate_reports_root_from_sentinel() {
        let mut bundle = MockBundleManifest::new();
        bundle.expect_is_available().return_const(true);
        bundle
            .expect_rlocation()
            .returning(|_| Ok(PathBuf::from("/bundle/project/.resource-root-sentinel")));

        let resolver = resolver(MockEnv::new(), MockFs::new()).with_bundle(bundle);
        let report = resolver.report(CandidateSource::Bundle);

        assert_eq!(report.status, CandidateStatus::Usable);
        assert_eq!(report.root, Some(PathBuf::from("/bundle")));
    }
}
