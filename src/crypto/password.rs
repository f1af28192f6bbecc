//! Random master-password generation.

use rand::Rng;
use zeroize::Zeroizing;

use crate::errors::{KeyVaultError, Result};

/// Characters a generated password is drawn from (70 symbols).
pub const ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

/// Length used when the caller does not ask for one.
pub const DEFAULT_LENGTH: usize = 32;

/// Longest password we are willing to generate.
pub const MAX_LENGTH: usize = 1024;

/// Generate a password of exactly `length` characters.
///
/// Each character is an independent, uniformly distributed draw from
/// `ALPHABET` using the thread-local CSPRNG. `random_range` rejects
/// out-of-range samples, so there is no modulo bias.
pub fn generate_password(length: usize) -> Result<Zeroizing<String>> {
    if length == 0 || length > MAX_LENGTH {
        return Err(KeyVaultError::InvalidArgument(format!(
            "password length must be between 1 and {MAX_LENGTH} (got {length})"
        )));
    }

    let mut rng = rand::rng();
    let password: String = (0..length)
        .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
        .collect();

    Ok(Zeroizing::new(password))
}
