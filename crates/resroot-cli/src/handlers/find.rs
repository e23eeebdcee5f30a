//! Find command handler.

use std::io::Write;

use resroot_core::Resolver;

use crate::error::CliError;

/// Resolve each path and report the outcome.
///
/// Resolved paths go to `out`. Diagnostics go to `err`, or to `out` as JSON
/// lines when `json` is set. Fails with [`CliError::NotFound`] if any path
/// could not be resolved.
pub fn execute(
    resolver: &Resolver,
    paths: &[String],
    json: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<(), CliError> {
    if paths.iter().any(String::is_empty) {
        return Err(CliError::Arguments(
            "resource paths must not be empty".to_string(),
        ));
    }

    let mut failed = 0usize;
    for path in paths {
        let result = resolver.resolve(path);
        if !result.is_success() {
            failed += 1;
        }

        if json {
            writeln!(out, "{}", serde_json::to_string(&result)?)?;
            continue;
        }
        match result.absolute_path() {
            Some(absolute) => writeln!(out, "{}", absolute.display())?,
            None => writeln!(err, "{}", result.error_message().unwrap_or_default())?,
        }
    }

    if failed > 0 {
        return Err(CliError::NotFound(format!(
            "{failed} of {} resource paths could not be resolved",
            paths.len()
        )));
    }
    Ok(())
}
