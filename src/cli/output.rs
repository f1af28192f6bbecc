//! What the CLI prints around a command's result.
//!
//! Confirmations go to stdout. Warnings and failures go to stderr, so the
//! bare values printed by `decrypt` and `generate-password` pipe cleanly.

use console::{style, StyledObject};

use crate::errors::KeyVaultError;

#[derive(Clone, Copy)]
enum Mark {
    Done,
    Failed,
    Caution,
    Next,
}

impl Mark {
    fn styled(self) -> StyledObject<&'static str> {
        match self {
            Mark::Done => style("\u{2713}").green().bold(),
            Mark::Failed => style("\u{2717}").red().bold(),
            Mark::Caution => style("\u{26a0}").yellow().bold(),
            Mark::Next => style("\u{2192}").dim(),
        }
    }
}

fn next_step(msg: &str) {
    println!("{} {}", Mark::Next.styled(), style(msg).dim());
}

/// Confirm an `encrypt` and show how to read the key back.
pub fn secret_stored(name: &str, replaced: bool) {
    let verb = if replaced { "updated" } else { "saved" };
    println!("{} Encrypted key '{name}' {verb}", Mark::Done.styled());
    next_step(&format!("Read it back: keyvault decrypt {name} <password>"));
}

/// Show a generated master password. This is the only time it is printed.
pub fn generated_password(password: &str) {
    println!("Generated master password: {}", style(password).bold());
    eprintln!(
        "{} Save this password securely. It is not stored anywhere and is required to decrypt.",
        Mark::Caution.styled()
    );
}

pub fn password_on_command_line() {
    eprintln!(
        "{} Password provided on command line; it may appear in shell history.",
        Mark::Caution.styled()
    );
}

/// Outcome of `validate`. Neither outcome is a command failure.
pub fn format_check(name: &str, valid: bool) {
    if valid {
        println!("{} Key '{name}' format is valid", Mark::Done.styled());
    } else {
        eprintln!("{} Key '{name}' format is invalid", Mark::Caution.styled());
    }
}

/// Report a failed command, with a next step where there is an obvious one.
pub fn failure(err: &KeyVaultError) {
    eprintln!("{} {err}", Mark::Failed.styled());

    let hint = match err {
        KeyVaultError::SecretNotFound(_) => Some("`keyvault list` shows the stored names"),
        KeyVaultError::DecryptionFailed => {
            Some("use the master password the key was encrypted with")
        }
        KeyVaultError::ConfigError(_) => Some("check .keyvault.toml in the current directory"),
        _ => None,
    };
    if let Some(hint) = hint {
        eprintln!("{} {}", Mark::Next.styled(), style(hint).dim());
    }
}
