//! Read-only access to secrets for a host process.
//!
//! A server embedding KeyVault needs one thing: the plaintext of a named
//! secret, decrypted with the process-wide master password. `ConfigLoader`
//! provides exactly that and nothing else. There is no caching, so each
//! call re-reads the vault and re-derives the key.

use zeroize::Zeroizing;

use crate::crypto;
use crate::errors::{KeyVaultError, Result};
use crate::vault::SecretStore;

/// Environment variable holding the master password.
pub const MASTER_PASSWORD_ENV: &str = "MASTER_PASSWORD";

pub struct ConfigLoader<S> {
    store: S,
    master_password: Option<Zeroizing<String>>,
}

impl<S: SecretStore> ConfigLoader<S> {
    /// Build a loader with an explicit master password. An empty string
    /// counts as "not configured".
    pub fn new(store: S, master_password: Option<String>) -> Self {
        Self {
            store,
            master_password: master_password
                .filter(|pw| !pw.is_empty())
                .map(Zeroizing::new),
        }
    }

    /// Build a loader whose master password comes from `MASTER_PASSWORD`.
    pub fn from_env(store: S) -> Self {
        Self::new(store, std::env::var(MASTER_PASSWORD_ENV).ok())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns `true` if a master password is available.
    pub fn has_master_password(&self) -> bool {
        self.master_password.is_some()
    }

    /// Decrypt and return the secret stored under `name`.
    ///
    /// Fails with `MasterPasswordMissing` before touching the store when no
    /// master password is configured. A decryption failure is reported as
    /// `SecretUnreadable`, pointing at the master password.
    pub fn get_secret(&self, name: &str) -> Result<String> {
        let password = self
            .master_password
            .as_ref()
            .ok_or(KeyVaultError::MasterPasswordMissing)?;

        let entry = self.store.get(name)?;
        crypto::decrypt(&entry.data, password, entry.cipher, &entry.kdf).map_err(|e| match e {
            KeyVaultError::DecryptionFailed => {
                tracing::warn!(name, "secret could not be decrypted");
                KeyVaultError::SecretUnreadable(name.to_string())
            }
            other => other,
        })
    }

    /// Returns `true` if a vault exists and holds at least one secret.
    pub fn has_secrets(&self) -> bool {
        match self.store.load() {
            Ok(vault) => !vault.is_empty(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read vault");
                false
            }
        }
    }

    /// Names of the stored secrets. Empty if the vault cannot be read.
    pub fn secret_names(&self) -> Vec<String> {
        match self.store.load() {
            Ok(vault) => vault.names(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read vault");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::MemoryStore;

    #[test]
    fn from_env_reads_master_password() {
        // The only test that touches this variable.
        std::env::set_var(MASTER_PASSWORD_ENV, "from-env");
        let loader = ConfigLoader::from_env(MemoryStore::new());
        std::env::remove_var(MASTER_PASSWORD_ENV);

        assert!(loader.has_master_password());
        assert!(matches!(
            loader.get_secret("openrouter"),
            Err(KeyVaultError::VaultNotFound(_))
        ));
    }
}
