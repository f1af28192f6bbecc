use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in KeyVault.
#[derive(Debug, Error)]
pub enum KeyVaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Wrong password, truncated blob, tampering: deliberately one variant.
    #[error("Failed to decrypt — invalid password or corrupted data")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("Vault not found at {0} — encrypt a secret first")]
    VaultNotFound(PathBuf),

    #[error("Invalid vault format: {0}")]
    InvalidVaultFormat(String),

    #[error("No encrypted secret found for '{0}'")]
    SecretNotFound(String),

    // --- Config errors ---
    #[error("MASTER_PASSWORD environment variable is required to decrypt secrets")]
    MasterPasswordMissing,

    #[error("Failed to decrypt '{0}': check your master password")]
    SecretUnreadable(String),

    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience type alias for KeyVault results.
pub type Result<T> = std::result::Result<T, KeyVaultError>;
