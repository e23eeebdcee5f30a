//! Layered resource-root resolution.
//!
//! Maps logical resource paths such as `project/data/model.xml` to absolute
//! filesystem paths by searching, in priority order, a directory named by an
//! environment variable, the runtime bundle of the current process, and the
//! share directory of an install tree. See [`resolver`] for details.
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod deprecation;
pub mod error;
pub mod ports;
pub mod resolver;
pub mod result;

pub use config::{
    DEFAULT_INSTALL_SHARE_RELPATH, DEFAULT_NAMESPACE_PREFIX, DEFAULT_RESOURCE_ROOT_ENV,
    DEFAULT_SENTINEL_RELPATH, RelocationRule, ResolverConfig, validate_config,
};
pub use deprecation::{DeprecationLog, WarnPolicy};
pub use error::{ConfigError, ResourceError};
pub use resolver::{
    CandidateReport, CandidateSource, CandidateStatus, Resolver, RootProbe, resolve,
    resolve_or_fail,
};
pub use result::{EMPTY_RESULT_MESSAGE, ResolutionResult};
