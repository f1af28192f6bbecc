//! Vault entry types and the in-memory `Vault` map.
//!
//! A vault is a JSON object keyed by secret name. Each entry holds the
//! base64 blob plus timestamps, and records the cipher scheme and KDF
//! parameters it was written with. Entries that predate those two fields
//! deserialize as legacy AES-256-CBC / PBKDF2-SHA256 x 100 000.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::{CipherScheme, KdfParams};

/// An encrypted value ready to be stored, as returned by the crypto layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedSecret {
    /// base64(salt || iv || ciphertext)
    pub data: String,
    pub cipher: CipherScheme,
    pub kdf: KdfParams,
}

/// A single stored secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultEntry {
    /// base64(salt || iv || ciphertext)
    pub data: String,

    /// When this secret was first created. Never changes.
    pub created: DateTime<Utc>,

    /// When this secret was last re-encrypted.
    pub updated: DateTime<Utc>,

    #[serde(default = "legacy_cipher")]
    pub cipher: CipherScheme,

    #[serde(default)]
    pub kdf: KdfParams,
}

fn legacy_cipher() -> CipherScheme {
    CipherScheme::Aes256Cbc
}

/// Lightweight metadata about a secret (no encrypted value).
///
/// Returned by `Vault::list` so callers can display names, timestamps
/// and the cipher in use without touching any ciphertext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretMetadata {
    pub name: String,
    pub cipher: CipherScheme,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// The full name -> entry mapping, the unit of persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vault {
    entries: BTreeMap<String, VaultEntry>,
}

impl Vault {
    /// Look up a single entry.
    pub fn get(&self, name: &str) -> Option<&VaultEntry> {
        self.entries.get(name)
    }

    /// Insert a new entry or re-encrypt an existing one.
    ///
    /// An existing entry keeps its `created` timestamp. `updated` never
    /// moves backwards, even if the clock did, so `created <= updated`
    /// holds across any sequence of writes.
    /// Returns `true` if an entry was replaced.
    pub fn upsert(&mut self, name: &str, sealed: SealedSecret, now: DateTime<Utc>) -> bool {
        match self.entries.get_mut(name) {
            Some(entry) => {
                entry.data = sealed.data;
                entry.cipher = sealed.cipher;
                entry.kdf = sealed.kdf;
                entry.updated = now.max(entry.updated);
                true
            }
            None => {
                self.entries.insert(
                    name.to_string(),
                    VaultEntry {
                        data: sealed.data,
                        created: now,
                        updated: now,
                        cipher: sealed.cipher,
                        kdf: sealed.kdf,
                    },
                );
                false
            }
        }
    }

    /// Metadata for every entry, sorted by name.
    pub fn list(&self) -> Vec<SecretMetadata> {
        self.entries
            .iter()
            .map(|(name, entry)| SecretMetadata {
                name: name.clone(),
                cipher: entry.cipher,
                created: entry.created,
                updated: entry.updated,
            })
            .collect()
    }

    /// Secret names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
