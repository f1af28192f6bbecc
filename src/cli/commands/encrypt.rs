//! `keyvault encrypt` — encrypt a secret and store it in the vault.

use crate::cli::output;
use crate::cli::{open_manager, Cli};
use crate::errors::Result;

/// Execute the `encrypt` command.
pub fn execute(cli: &Cli, name: &str, secret: &str, password: Option<&str>) -> Result<()> {
    if password.is_some() {
        output::password_on_command_line();
    }

    let manager = open_manager(cli)?;
    let outcome = manager.encrypt(name, secret, password)?;

    if let Some(generated) = &outcome.generated_password {
        output::generated_password(generated.as_str());
    }
    output::secret_stored(name, outcome.replaced);

    Ok(())
}
