//! Logical resource path resolution.
//!
//! ## Architecture
//!
//! - `candidate`: candidate root sources, probe outcomes and diagnostics
//! - `sentinel`: validation of a root against its sentinel file
//! - `shims`: fallbacks for legacy directory and relocated-subtree lookups
//! - `resolve`: the [`Resolver`] and the free `resolve` functions
//!
//! ## Usage
//!
//! ```rust,no_run
//! use resroot_core::resolver::resolve;
//!
//! let result = resolve("project/data/model.xml");
//! match result.absolute_path() {
//!     Some(path) => println!("found {}", path.display()),
//!     None => eprintln!("{}", result.error_message().unwrap_or_default()),
//! }
//! ```

mod candidate;
mod resolve;
mod sentinel;
mod shims;

pub use candidate::{CandidateReport, CandidateSource, CandidateStatus, RootProbe};
pub use resolve::{Resolver, resolve, resolve_or_fail};

/// Whether `path` is relative: non-empty and not rooted.
pub(crate) fn is_relative_path(path: &str) -> bool {
    !path.is_empty() && !path.starts_with('/') && !std::path::Path::new(path).has_root()
}
