//! On-disk vault file: a single pretty-printed JSON object.
//!
//! ```text
//! {
//!   "<name>": { "data": "...", "created": "...", "updated": "...",
//!               "cipher": "aes-256-gcm", "kdf": { ... } }
//! }
//! ```
//!
//! Writes go to a fresh temp file in the same directory which is then
//! renamed over the target, so readers never see a half-written file.

use std::fs;
use std::io::Write;
use std::path::Path;

use super::entry::Vault;
use crate::errors::{KeyVaultError, Result};

/// Read a vault file.
///
/// Returns `Ok(None)` when the file does not exist. A file that exists but
/// is not a valid vault is an `InvalidVaultFormat` error.
pub fn read_vault(path: &Path) -> Result<Option<Vault>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let vault: Vault = serde_json::from_str(&contents).map_err(|e| {
        KeyVaultError::InvalidVaultFormat(format!("{}: {e}", path.display()))
    })?;

    tracing::debug!(path = %path.display(), entries = vault.len(), "loaded vault");
    Ok(Some(vault))
}

/// Write a vault file to disk **atomically**.
///
/// 1. Serialize the vault to JSON.
/// 2. Write to a uniquely named temp file in the same directory (mode 0600
///    on Unix).
/// 3. Rename the temp file over the target path.
///
/// Every call gets its own temp file, so concurrent writers never share
/// one: the last rename wins and a writer that reports an error has not
/// touched the live file. The temp file is removed on any failure.
pub fn write_vault(path: &Path, vault: &Vault) -> Result<()> {
    let buf = serde_json::to_vec_pretty(vault)
        .map_err(|e| KeyVaultError::SerializationError(format!("vault: {e}")))?;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        fs::create_dir_all(parent)?;
    }

    let mut tmp = tempfile::Builder::new()
        .prefix(".keyvault-")
        .suffix(".tmp")
        .tempfile_in(parent)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    tmp.write_all(&buf)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    tracing::debug!(path = %path.display(), entries = vault.len(), "saved vault");
    Ok(())
}
