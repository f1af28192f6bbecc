//! Vault module — encrypted secret storage.
//!
//! This module provides:
//! - `Vault`, `VaultEntry` and `SecretMetadata` types (`entry`)
//! - The JSON vault file with atomic writes (`format`)
//! - The `SecretStore` trait with file and in-memory backends (`store`)
//! - `VaultManager`, the administrative operations (`manager`)

pub mod entry;
pub mod format;
pub mod manager;
pub mod store;

// Re-export the most commonly used items.
pub use entry::{SealedSecret, SecretMetadata, Vault, VaultEntry};
pub use manager::{EncryptOutcome, VaultManager};
pub use store::{FileStore, MemoryStore, SecretStore};
