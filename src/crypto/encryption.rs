//! Password-based encryption of single secret values.
//!
//! Every call to `encrypt` draws a fresh 16-byte salt and a fresh 16-byte
//! IV, derives a key from the password and salt, and returns the framed
//! result as a base64 string.
//!
//! Layout of the decoded blob:
//!   [ 16-byte salt | 16-byte IV | ciphertext ]
//!
//! New secrets use AES-256-GCM keyed with the 16-byte IV as nonce, so the
//! ciphertext ends in a 16-byte auth tag. Blobs written by older tooling
//! use AES-256-CBC with PKCS#7 padding and carry no tag; they can still be
//! decrypted by passing `CipherScheme::Aes256Cbc`.

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::kdf::{derive_key, generate_salt, KdfParams, SALT_LEN};
use crate::errors::{KeyVaultError, Result};

/// Size of the IV (also the GCM nonce) in bytes.
pub const IV_LEN: usize = 16;

/// Smallest blob that could have come out of `encrypt`: salt, IV and at
/// least one byte of ciphertext.
pub const MIN_BLOB_LEN: usize = SALT_LEN + IV_LEN + 1;

/// AES-256-GCM with a 128-bit nonce.
type Aes256Gcm16 = AesGcm<Aes256, U16>;
type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// The cipher construction a blob was produced with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CipherScheme {
    /// Authenticated; used for everything written by this crate.
    #[default]
    #[serde(rename = "aes-256-gcm")]
    Aes256Gcm,
    /// Unauthenticated legacy format. Wrong keys are only caught by
    /// padding and UTF-8 checks.
    #[serde(rename = "aes-256-cbc")]
    Aes256Cbc,
}

impl CipherScheme {
    /// The name used in the vault file.
    pub fn label(self) -> &'static str {
        match self {
            CipherScheme::Aes256Gcm => "aes-256-gcm",
            CipherScheme::Aes256Cbc => "aes-256-cbc",
        }
    }
}

/// Encrypt `plaintext` under `password` with the default scheme.
///
/// Returns base64(salt || iv || ciphertext).
pub fn encrypt(plaintext: &str, password: &str, params: &KdfParams) -> Result<String> {
    encrypt_with(CipherScheme::default(), plaintext, password, params)
}

/// Encrypt `plaintext` under `password` with an explicit scheme.
pub fn encrypt_with(
    scheme: CipherScheme,
    plaintext: &str,
    password: &str,
    params: &KdfParams,
) -> Result<String> {
    if plaintext.is_empty() || password.is_empty() {
        return Err(KeyVaultError::InvalidArgument(
            "secret and master password are required".into(),
        ));
    }

    let salt = generate_salt();
    let mut iv = [0u8; IV_LEN];
    rand::rng().fill_bytes(&mut iv);

    let key = derive_key(password.as_bytes(), &salt, params)?;

    let ciphertext = match scheme {
        CipherScheme::Aes256Gcm => {
            let cipher = Aes256Gcm16::new_from_slice(&key[..]).map_err(|e| {
                KeyVaultError::EncryptionFailed(format!("invalid key length: {e}"))
            })?;
            cipher
                .encrypt(Nonce::<U16>::from_slice(&iv), plaintext.as_bytes())
                .map_err(|e| KeyVaultError::EncryptionFailed(format!("encryption error: {e}")))?
        }
        CipherScheme::Aes256Cbc => Aes256CbcEnc::new_from_slices(&key[..], &iv)
            .map_err(|e| KeyVaultError::EncryptionFailed(format!("invalid key length: {e}")))?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes()),
    };

    let mut blob = Vec::with_capacity(SALT_LEN + IV_LEN + ciphertext.len());
    blob.extend_from_slice(&salt);
    blob.extend_from_slice(&iv);
    blob.extend_from_slice(&ciphertext);
    Ok(BASE64.encode(blob))
}

/// Decrypt a blob produced by `encrypt`/`encrypt_with`.
///
/// Bad base64, short input, a failed tag check, bad padding and non-UTF-8
/// output all come back as `DecryptionFailed`, with no hint of which.
pub fn decrypt(
    blob: &str,
    password: &str,
    scheme: CipherScheme,
    params: &KdfParams,
) -> Result<String> {
    if blob.is_empty() || password.is_empty() {
        return Err(KeyVaultError::InvalidArgument(
            "encrypted data and master password are required".into(),
        ));
    }

    let data = BASE64
        .decode(blob.trim())
        .map_err(|_| KeyVaultError::DecryptionFailed)?;
    if data.len() < MIN_BLOB_LEN {
        return Err(KeyVaultError::DecryptionFailed);
    }

    let (salt, rest) = data.split_at(SALT_LEN);
    let (iv, ciphertext) = rest.split_at(IV_LEN);

    let key = derive_key(password.as_bytes(), salt, params)?;

    let plaintext = match scheme {
        CipherScheme::Aes256Gcm => {
            let cipher = Aes256Gcm16::new_from_slice(&key[..])
                .map_err(|_| KeyVaultError::DecryptionFailed)?;
            cipher
                .decrypt(Nonce::<U16>::from_slice(iv), ciphertext)
                .map_err(|_| KeyVaultError::DecryptionFailed)?
        }
        CipherScheme::Aes256Cbc => Aes256CbcDec::new_from_slices(&key[..], iv)
            .map_err(|_| KeyVaultError::DecryptionFailed)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| KeyVaultError::DecryptionFailed)?,
    };

    String::from_utf8(plaintext).map_err(|e| {
        let mut bad_bytes = e.into_bytes();
        bad_bytes.zeroize();
        KeyVaultError::DecryptionFailed
    })
}

/// Structural check only: the blob is base64 and long enough to hold a
/// salt, an IV and some ciphertext. Says nothing about any password.
pub fn validate(blob: &str) -> bool {
    BASE64
        .decode(blob.trim())
        .map(|data| data.len() >= MIN_BLOB_LEN)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::kdf::KdfAlgorithm;

    const FAST: KdfParams = KdfParams {
        algorithm: KdfAlgorithm::Pbkdf2Sha256,
        iterations: 1_000,
    };

    #[test]
    fn gcm_blob_carries_salt_iv_and_tag() {
        let blob = encrypt("abc", "pw", &FAST).unwrap();
        let raw = BASE64.decode(blob).unwrap();
        // 3 bytes of ciphertext + 16-byte tag
        assert_eq!(raw.len(), SALT_LEN + IV_LEN + 3 + 16);
    }

    #[test]
    fn cbc_blob_is_block_padded() {
        let blob = encrypt_with(CipherScheme::Aes256Cbc, "abc", "pw", &FAST).unwrap();
        let raw = BASE64.decode(blob).unwrap();
        assert_eq!(raw.len(), SALT_LEN + IV_LEN + 16);
    }

    #[test]
    fn scheme_mismatch_fails() {
        let blob = encrypt("value", "pw", &FAST).unwrap();
        let result = decrypt(&blob, "pw", CipherScheme::Aes256Cbc, &FAST);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_empty_inputs() {
        assert!(matches!(
            encrypt("", "pw", &FAST),
            Err(KeyVaultError::InvalidArgument(_))
        ));
        assert!(matches!(
            encrypt("value", "", &FAST),
            Err(KeyVaultError::InvalidArgument(_))
        ));
        assert!(matches!(
            decrypt("", "pw", CipherScheme::Aes256Gcm, &FAST),
            Err(KeyVaultError::InvalidArgument(_))
        ));
    }

    #[test]
    fn undecodable_blob_is_a_decryption_failure() {
        let result = decrypt("not base64!!", "pw", CipherScheme::Aes256Gcm, &FAST);
        assert!(matches!(result, Err(KeyVaultError::DecryptionFailed)));
    }

    #[test]
    fn validate_rejects_garbage() {
        assert!(!validate("%%%"));
        assert!(!validate(""));
    }
}
