//! Integration tests for `ConfigLoader`, the read path used by host
//! processes.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use keyvault::config::ConfigLoader;
use keyvault::crypto::KdfParams;
use keyvault::errors::{KeyVaultError, Result};
use keyvault::vault::{FileStore, MemoryStore, SecretStore, Vault, VaultManager};
use tempfile::TempDir;

/// A store that counts how often it is read.
#[derive(Default)]
struct CountingStore {
    inner: MemoryStore,
    reads: AtomicUsize,
}

impl SecretStore for CountingStore {
    fn read(&self) -> Result<Option<Vault>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read()
    }

    fn write(&self, vault: &Vault) -> Result<()> {
        self.inner.write(vault)
    }

    fn location(&self) -> PathBuf {
        self.inner.location()
    }
}

/// A memory store holding `openrouter` encrypted under `hunter2`.
fn seeded_store() -> MemoryStore {
    let m = VaultManager::new(MemoryStore::new()).with_kdf(KdfParams::pbkdf2(1_000));
    m.encrypt("openrouter", "sk-or-v1-abc123", Some("hunter2"))
        .unwrap();
    MemoryStore::with_vault(m.store().load().unwrap())
}

#[test]
fn get_secret_decrypts_with_master_password() {
    let loader = ConfigLoader::new(seeded_store(), Some("hunter2".into()));
    assert_eq!(loader.get_secret("openrouter").unwrap(), "sk-or-v1-abc123");
}

#[test]
fn missing_master_password_fails_without_reading_the_vault() {
    let loader = ConfigLoader::new(CountingStore::default(), None);

    assert!(!loader.has_master_password());
    assert!(matches!(
        loader.get_secret("openrouter"),
        Err(KeyVaultError::MasterPasswordMissing)
    ));
    assert_eq!(loader.store().reads.load(Ordering::SeqCst), 0);
}

#[test]
fn empty_master_password_counts_as_missing() {
    let loader = ConfigLoader::new(CountingStore::default(), Some(String::new()));

    assert!(matches!(
        loader.get_secret("openrouter"),
        Err(KeyVaultError::MasterPasswordMissing)
    ));
    assert_eq!(loader.store().reads.load(Ordering::SeqCst), 0);
}

#[test]
fn configured_loader_reads_on_every_call() {
    let loader = ConfigLoader::new(CountingStore::default(), Some("hunter2".into()));
    let _ = loader.get_secret("openrouter");
    let _ = loader.get_secret("openrouter");
    assert_eq!(loader.store().reads.load(Ordering::SeqCst), 2);
}

#[test]
fn wrong_master_password_points_at_the_password() {
    let loader = ConfigLoader::new(seeded_store(), Some("wrongpass".into()));
    let err = loader.get_secret("openrouter").unwrap_err();

    assert!(matches!(err, KeyVaultError::SecretUnreadable(ref name) if name == "openrouter"));
    assert!(err.to_string().contains("check your master password"));
}

#[test]
fn unknown_name_and_missing_vault_are_not_found() {
    let loader = ConfigLoader::new(seeded_store(), Some("hunter2".into()));
    assert!(matches!(
        loader.get_secret("stripe"),
        Err(KeyVaultError::SecretNotFound(_))
    ));

    let dir = TempDir::new().unwrap();
    let loader = ConfigLoader::new(
        FileStore::new(dir.path().join("absent.json")),
        Some("hunter2".into()),
    );
    assert!(matches!(
        loader.get_secret("openrouter"),
        Err(KeyVaultError::VaultNotFound(_))
    ));
}

#[test]
fn every_call_rereads_the_vault() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".encrypted_keys.json");
    let admin = VaultManager::new(FileStore::new(&path)).with_kdf(KdfParams::pbkdf2(1_000));
    let loader = ConfigLoader::new(FileStore::new(&path), Some("hunter2".into()));

    admin.encrypt("openrouter", "first", Some("hunter2")).unwrap();
    assert_eq!(loader.get_secret("openrouter").unwrap(), "first");

    admin.encrypt("openrouter", "second", Some("hunter2")).unwrap();
    assert_eq!(loader.get_secret("openrouter").unwrap(), "second");
}

#[test]
fn status_helpers_reflect_the_vault() {
    let loader = ConfigLoader::new(seeded_store(), None);
    assert!(loader.has_secrets());
    assert_eq!(loader.secret_names(), vec!["openrouter".to_string()]);

    let empty = ConfigLoader::new(MemoryStore::new(), None);
    assert!(!empty.has_secrets());
    assert!(empty.secret_names().is_empty());
}

#[test]
fn status_helpers_degrade_on_corrupt_vault() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".encrypted_keys.json");
    fs::write(&path, "{ broken").unwrap();

    let loader = ConfigLoader::new(FileStore::new(&path), Some("hunter2".into()));
    assert!(!loader.has_secrets());
    assert!(loader.secret_names().is_empty());
    assert!(matches!(
        loader.get_secret("openrouter"),
        Err(KeyVaultError::InvalidVaultFormat(_))
    ));
}
