use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::{KdfParams, DEFAULT_ITERATIONS, MAX_ITERATIONS, MIN_ITERATIONS};
use crate::crypto::password::{DEFAULT_LENGTH, MAX_LENGTH};
use crate::errors::{KeyVaultError, Result};

/// Project-level configuration, loaded from `.keyvault.toml`.
///
/// Every field has a sensible default so KeyVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Vault file (relative to the project root unless absolute).
    #[serde(default = "default_vault_file")]
    pub vault_file: String,

    /// PBKDF2 iteration count for newly encrypted secrets.
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,

    /// Length of generated master passwords.
    #[serde(default = "default_password_length")]
    pub password_length: usize,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_file() -> String {
    ".encrypted_keys.json".to_string()
}

fn default_kdf_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

fn default_password_length() -> usize {
    DEFAULT_LENGTH
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_file: default_vault_file(),
            kdf_iterations: default_kdf_iterations(),
            password_length: default_password_length(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".keyvault.toml";

    /// Load settings from `<project_dir>/.keyvault.toml`.
    ///
    /// If the file does not exist, defaults are returned. If it exists
    /// but cannot be parsed or holds unsafe values, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            KeyVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        settings.check()?;
        Ok(settings)
    }

    /// Reject values that would weaken or break encryption.
    fn check(&self) -> Result<()> {
        if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&self.kdf_iterations) {
            return Err(KeyVaultError::ConfigError(format!(
                "kdf_iterations must be between {MIN_ITERATIONS} and {MAX_ITERATIONS} (got {})",
                self.kdf_iterations
            )));
        }
        if self.password_length == 0 || self.password_length > MAX_LENGTH {
            return Err(KeyVaultError::ConfigError(format!(
                "password_length must be between 1 and {MAX_LENGTH} (got {})",
                self.password_length
            )));
        }
        if self.vault_file.trim().is_empty() {
            return Err(KeyVaultError::ConfigError(
                "vault_file cannot be empty".into(),
            ));
        }
        Ok(())
    }

    /// Build the full path to the vault file.
    ///
    /// Example: `project_dir/.encrypted_keys.json`
    pub fn vault_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.vault_file)
    }

    /// KDF parameters for newly encrypted secrets.
    pub fn kdf_params(&self) -> KdfParams {
        KdfParams::pbkdf2(self.kdf_iterations)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.vault_file, ".encrypted_keys.json");
        assert_eq!(s.kdf_iterations, 100_000);
        assert_eq!(s.password_length, 32);
        assert_eq!(s.kdf_params(), KdfParams::default());
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_file, ".encrypted_keys.json");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
vault_file = "secrets/keys.json"
kdf_iterations = 250000
password_length = 48
"#;
        fs::write(tmp.path().join(".keyvault.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_file, "secrets/keys.json");
        assert_eq!(settings.kdf_iterations, 250_000);
        assert_eq!(settings.password_length, 48);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".keyvault.toml"), "password_length = 16\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.password_length, 16);
        assert_eq!(settings.vault_file, ".encrypted_keys.json");
        assert_eq!(settings.kdf_iterations, 100_000);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".keyvault.toml"), "not valid {{toml").unwrap();

        let result = Settings::load(tmp.path());
        assert!(matches!(result, Err(KeyVaultError::ConfigError(_))));
    }

    #[test]
    fn load_rejects_weak_iteration_count() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".keyvault.toml"), "kdf_iterations = 10\n").unwrap();

        let result = Settings::load(tmp.path());
        assert!(matches!(result, Err(KeyVaultError::ConfigError(_))));
    }

    #[test]
    fn load_rejects_runaway_iteration_count() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(".keyvault.toml"),
            "kdf_iterations = 4294967295\n",
        )
        .unwrap();

        let result = Settings::load(tmp.path());
        assert!(matches!(result, Err(KeyVaultError::ConfigError(_))));
    }

    #[test]
    fn vault_path_builds_correct_path() {
        let s = Settings::default();
        let project = Path::new("/home/user/chat");
        assert_eq!(
            s.vault_path(project),
            PathBuf::from("/home/user/chat/.encrypted_keys.json")
        );
    }
}
