//! Roots command handler.
//!
//! Prints every candidate resource root in `description = root (status)`
//! format, in the order resolution would try them.

use std::io::Write;

use resroot_core::Resolver;

use crate::error::CliError;

pub fn execute(resolver: &Resolver, out: &mut impl Write) -> Result<(), CliError> {
    for report in resolver.candidates() {
        writeln!(out, "{report}")?;
    }
    Ok(())
}
