//! `keyvault validate` — structural check of a stored secret.

use crate::cli::output;
use crate::cli::{open_manager, Cli};
use crate::errors::Result;

/// Execute the `validate` command.
///
/// Only the blob's shape is checked; no password is involved.
pub fn execute(cli: &Cli, name: &str) -> Result<()> {
    let manager = open_manager(cli)?;

    output::format_check(name, manager.validate(name)?);

    Ok(())
}
