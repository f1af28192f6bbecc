//! `keyvault generate-password` — print a fresh random master password.

use crate::cli::settings;
use crate::crypto;
use crate::errors::Result;

/// Execute the `generate-password` command. No vault is read or written.
pub fn execute(length: Option<usize>) -> Result<()> {
    let settings = settings()?;
    let password = crypto::generate_password(length.unwrap_or(settings.password_length))?;
    println!("{}", password.as_str());

    Ok(())
}
