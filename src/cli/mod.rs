//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use crate::config::Settings;
use crate::errors::Result;
use crate::vault::{FileStore, VaultManager};

/// KeyVault CLI: encrypted API key manager.
#[derive(Parser)]
#[command(
    name = "keyvault",
    about = "Encrypt and manage API keys behind a master password",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault file (default: from .keyvault.toml, else .encrypted_keys.json)
    #[arg(long, env = "KEYVAULT_FILE", global = true)]
    pub vault_file: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Encrypt a secret and store it (generates a password if omitted)
    Encrypt {
        /// Secret name (e.g. openrouter)
        name: String,
        /// Secret value (e.g. the API key)
        secret: String,
        /// Master password (omit to generate one)
        password: Option<String>,
    },

    /// Decrypt a stored secret and print it
    Decrypt {
        /// Secret name
        name: String,
        /// Master password
        password: String,
    },

    /// Generate a secure random master password
    GeneratePassword {
        /// Password length (default: 32)
        length: Option<usize>,
    },

    /// List all stored secrets
    List,

    /// Check that a stored secret is structurally well-formed
    Validate {
        /// Secret name
        name: String,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load `.keyvault.toml` from the current directory.
pub fn settings() -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::load(&cwd)
}

/// Resolve the vault file path: `--vault-file` / `KEYVAULT_FILE` first,
/// then the settings file.
pub fn vault_path(cli: &Cli, settings: &Settings) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match &cli.vault_file {
        Some(path) => cwd.join(path),
        None => settings.vault_path(&cwd),
    })
}

/// Build a manager over the file vault selected by the CLI arguments.
pub fn open_manager(cli: &Cli) -> Result<VaultManager<FileStore>> {
    let settings = settings()?;
    let path = vault_path(cli, &settings)?;
    tracing::debug!(path = %path.display(), "using vault file");

    Ok(VaultManager::new(FileStore::new(path))
        .with_kdf(settings.kdf_params())
        .with_password_length(settings.password_length))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn encrypt_password_is_optional() {
        let cli = Cli::try_parse_from(["keyvault", "encrypt", "openrouter", "sk-1"]).unwrap();
        match cli.command {
            Commands::Encrypt { password, .. } => assert!(password.is_none()),
            _ => panic!("expected encrypt"),
        }
    }

    #[test]
    fn decrypt_requires_password() {
        assert!(Cli::try_parse_from(["keyvault", "decrypt", "openrouter"]).is_err());
    }

    #[test]
    fn generate_password_rejects_non_numeric_length() {
        assert!(Cli::try_parse_from(["keyvault", "generate-password", "abc"]).is_err());
    }

    #[test]
    fn vault_file_flag_is_global() {
        let cli =
            Cli::try_parse_from(["keyvault", "list", "--vault-file", "keys.json"]).unwrap();
        assert_eq!(cli.vault_file.as_deref(), Some("keys.json"));
    }
}
