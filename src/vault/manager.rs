//! Administrative operations behind the CLI.
//!
//! `VaultManager` ties a `SecretStore` to the crypto layer. The CLI
//! commands are thin wrappers that call one method each and print the
//! result.

use zeroize::Zeroizing;

use super::entry::{SealedSecret, SecretMetadata};
use super::store::SecretStore;
use crate::crypto::password::DEFAULT_LENGTH;
use crate::crypto::{self, CipherScheme, KdfParams};
use crate::errors::{KeyVaultError, Result};

/// Result of `VaultManager::encrypt`.
#[derive(Debug)]
pub struct EncryptOutcome {
    /// Set when no password was supplied. It is not stored anywhere, so
    /// the caller must show it to the operator.
    pub generated_password: Option<Zeroizing<String>>,
    /// `true` if an existing secret with the same name was replaced.
    pub replaced: bool,
}

pub struct VaultManager<S> {
    store: S,
    kdf: KdfParams,
    password_length: usize,
}

impl<S: SecretStore> VaultManager<S> {
    /// A manager using default KDF parameters and password length.
    pub fn new(store: S) -> Self {
        Self {
            store,
            kdf: KdfParams::default(),
            password_length: DEFAULT_LENGTH,
        }
    }

    /// KDF parameters for newly encrypted secrets. Existing entries keep
    /// the parameters they were written with.
    pub fn with_kdf(mut self, kdf: KdfParams) -> Self {
        self.kdf = kdf;
        self
    }

    /// Length of passwords generated by `encrypt` and `generate_password`.
    pub fn with_password_length(mut self, length: usize) -> Self {
        self.password_length = length;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Encrypt `secret` and store it under `name`.
    ///
    /// If `password` is `None` a fresh one is generated and returned in
    /// the outcome.
    pub fn encrypt(
        &self,
        name: &str,
        secret: &str,
        password: Option<&str>,
    ) -> Result<EncryptOutcome> {
        validate_secret_name(name)?;
        if secret.is_empty() {
            return Err(KeyVaultError::InvalidArgument(
                "secret value cannot be empty".into(),
            ));
        }

        if password == Some("") {
            return Err(KeyVaultError::InvalidArgument(
                "master password cannot be empty".into(),
            ));
        }

        let generated_password = match password {
            Some(_) => None,
            None => Some(crypto::generate_password(self.password_length)?),
        };
        let password = match &generated_password {
            Some(generated) => generated.as_str(),
            None => password.unwrap_or_default(),
        };

        let data = crypto::encrypt(secret, password, &self.kdf)?;
        let replaced = self.store.put(
            name,
            SealedSecret {
                data,
                cipher: CipherScheme::default(),
                kdf: self.kdf,
            },
        )?;

        Ok(EncryptOutcome {
            generated_password,
            replaced,
        })
    }

    /// Load and decrypt the secret stored under `name`.
    pub fn decrypt(&self, name: &str, password: &str) -> Result<String> {
        if password.is_empty() {
            return Err(KeyVaultError::InvalidArgument(
                "master password cannot be empty".into(),
            ));
        }
        let entry = self.store.get(name)?;
        crypto::decrypt(&entry.data, password, entry.cipher, &entry.kdf)
    }

    /// All stored names with their timestamps, sorted by name.
    pub fn list(&self) -> Result<Vec<SecretMetadata>> {
        Ok(self.store.load()?.list())
    }

    /// Structural check of the blob stored under `name`.
    ///
    /// `true` does not mean any particular password will decrypt it.
    pub fn validate(&self, name: &str) -> Result<bool> {
        let entry = self.store.get(name)?;
        Ok(crypto::validate(&entry.data))
    }

    /// A fresh random password; touches no vault state.
    pub fn generate_password(&self, length: Option<usize>) -> Result<Zeroizing<String>> {
        crypto::generate_password(length.unwrap_or(self.password_length))
    }
}

/// Validate that a secret name is safe to write.
///
/// Allowed: ASCII letters, digits, underscores, hyphens, periods.
/// Must be non-empty and at most 256 characters.
pub fn validate_secret_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(KeyVaultError::InvalidArgument(
            "secret name cannot be empty".into(),
        ));
    }
    if name.len() > 256 {
        return Err(KeyVaultError::InvalidArgument(
            "secret name cannot exceed 256 characters".into(),
        ));
    }
    if !name
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.')
    {
        return Err(KeyVaultError::InvalidArgument(format!(
            "secret name '{name}' contains invalid characters — only ASCII letters, digits, underscores, hyphens, and periods are allowed"
        )));
    }
    Ok(())
}
