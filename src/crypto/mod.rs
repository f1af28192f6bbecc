//! Cryptographic primitives for KeyVault.
//!
//! This module provides:
//! - PBKDF2-SHA256 password-based key derivation (`kdf`)
//! - Blob encryption, decryption and structural validation (`encryption`)
//! - Random master-password generation (`password`)

pub mod encryption;
pub mod kdf;
pub mod password;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, KdfParams, ...};
pub use encryption::{decrypt, encrypt, encrypt_with, validate, CipherScheme};
pub use kdf::{derive_key, generate_salt, KdfAlgorithm, KdfParams};
pub use password::generate_password;
