//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The parameters used for an entry are stored next to its ciphertext
//! (`KdfParams`), so raising the default work factor later does not
//! break secrets that were encrypted under the old one.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::errors::{KeyVaultError, Result};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Default PBKDF2 iteration count.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Minimum accepted iteration count.
pub const MIN_ITERATIONS: u32 = 1_000;

/// Maximum accepted iteration count. Parameters are read back from the
/// vault file, so a corrupted entry must not stall a decrypt.
pub const MAX_ITERATIONS: u32 = 10_000_000;

/// Supported key-derivation functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KdfAlgorithm {
    #[serde(rename = "pbkdf2-sha256")]
    Pbkdf2Sha256,
}

/// KDF parameters stored with every vault entry.
///
/// Entries written before parameters were recorded fall back to
/// `KdfParams::default()`, which matches what they were encrypted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    pub algorithm: KdfAlgorithm,
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            algorithm: KdfAlgorithm::Pbkdf2Sha256,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl KdfParams {
    /// PBKDF2-SHA256 with a custom iteration count.
    pub fn pbkdf2(iterations: u32) -> Self {
        Self {
            algorithm: KdfAlgorithm::Pbkdf2Sha256,
            iterations,
        }
    }
}

/// Derive a 32-byte key from a password and salt.
///
/// The same password + salt + params always produce the same key.
/// The output is wiped from memory when dropped.
pub fn derive_key(
    password: &[u8],
    salt: &[u8],
    params: &KdfParams,
) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&params.iterations) {
        return Err(KeyVaultError::KeyDerivationFailed(format!(
            "iterations must be between {MIN_ITERATIONS} and {MAX_ITERATIONS} (got {})",
            params.iterations
        )));
    }

    tracing::debug!(iterations = params.iterations, "deriving key");

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    match params.algorithm {
        KdfAlgorithm::Pbkdf2Sha256 => {
            pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, params.iterations, &mut key[..]);
        }
    }

    Ok(key)
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}
