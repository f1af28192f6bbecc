//! Persistence backends for the vault.
//!
//! Every operation goes through a `SecretStore` handle instead of a
//! global file path, so callers (and tests) pick the backend:
//! - `FileStore` reads and writes a JSON file on disk.
//! - `MemoryStore` keeps the vault in process memory.
//!
//! Nothing is cached: each call reads the current state afresh. `put` is a
//! whole-vault read-modify-write without locking, so two concurrent writers
//! can still lose one update (last write wins). Each individual write is
//! atomic.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::Utc;

use super::entry::{SealedSecret, Vault, VaultEntry};
use super::format;
use crate::errors::{KeyVaultError, Result};

/// A place a vault can be loaded from and saved to.
pub trait SecretStore: Send + Sync {
    /// Read the persisted vault, or `None` if nothing was ever saved.
    fn read(&self) -> Result<Option<Vault>>;

    /// Replace the persisted vault with `vault`.
    fn write(&self, vault: &Vault) -> Result<()>;

    /// Where the vault lives, for error messages.
    fn location(&self) -> PathBuf;

    /// Load the vault. A store that has never been written is empty,
    /// not an error; an unparsable one is.
    fn load(&self) -> Result<Vault> {
        Ok(self.read()?.unwrap_or_default())
    }

    /// Returns `true` if a vault has been persisted.
    fn exists(&self) -> Result<bool> {
        Ok(self.read()?.is_some())
    }

    /// Insert or re-encrypt `name` and persist the whole vault.
    ///
    /// Returns `true` if an existing entry was replaced.
    fn put(&self, name: &str, sealed: SealedSecret) -> Result<bool> {
        let mut vault = self.load()?;
        let replaced = vault.upsert(name, sealed, Utc::now());
        self.write(&vault)?;
        tracing::debug!(name, replaced, "stored secret");
        Ok(replaced)
    }

    /// Fetch a single entry.
    fn get(&self, name: &str) -> Result<VaultEntry> {
        let vault = self
            .read()?
            .ok_or_else(|| KeyVaultError::VaultNotFound(self.location()))?;
        vault
            .get(name)
            .cloned()
            .ok_or_else(|| KeyVaultError::SecretNotFound(name.to_string()))
    }
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// A vault persisted as one JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SecretStore for FileStore {
    fn read(&self) -> Result<Option<Vault>> {
        format::read_vault(&self.path)
    }

    fn write(&self, vault: &Vault) -> Result<()> {
        format::write_vault(&self.path, vault)
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> Result<bool> {
        Ok(self.path.exists())
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// A vault held in memory. Starts out "never written".
#[derive(Debug, Default)]
pub struct MemoryStore {
    vault: Mutex<Option<Vault>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `vault`.
    pub fn with_vault(vault: Vault) -> Self {
        Self {
            vault: Mutex::new(Some(vault)),
        }
    }
}

impl SecretStore for MemoryStore {
    fn read(&self) -> Result<Option<Vault>> {
        Ok(self
            .vault
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn write(&self, vault: &Vault) -> Result<()> {
        *self.vault.lock().unwrap_or_else(PoisonError::into_inner) = Some(vault.clone());
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from(":memory:")
    }
}
