//! `keyvault decrypt` — decrypt a stored secret and print it.

use crate::cli::{open_manager, Cli};
use crate::errors::Result;

/// Execute the `decrypt` command.
pub fn execute(cli: &Cli, name: &str, password: &str) -> Result<()> {
    let manager = open_manager(cli)?;

    // Print the bare value so it can be captured by scripts.
    let value = manager.decrypt(name, password)?;
    println!("{value}");

    Ok(())
}
