//! On-disk store for the active license key.

use crate::error::{VaultError, VaultResult};
use crate::record::{EncryptedRecord, open, seal};
use crate::store_key::StoreKey;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Persists exactly one license key at a configured path, sealed with
/// AES-256-GCM.
///
/// The store treats the license key as opaque text and never interprets
/// license content. Concurrent writers are not coordinated: the last
/// writer wins, and because writes replace the file atomically a reader
/// racing a writer observes either the old record or the new one, never a
/// torn file. Nothing is held across calls; each operation opens, reads or
/// writes, and releases the file before returning.
pub struct LicenseStore {
    path: PathBuf,
    key: StoreKey,
}

impl LicenseStore {
    /// Creates a store over `path` using the program's embedded key.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_key(path, StoreKey::embedded())
    }

    /// Creates a store over `path` with caller-supplied key material.
    pub fn with_key(path: impl Into<PathBuf>, key: StoreKey) -> Self {
        Self {
            path: path.into(),
            key,
        }
    }

    /// Returns the path of the license file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Seals `license_key` and replaces the license file with the record.
    ///
    /// The record is written to a temporary file in the same directory and
    /// renamed into place, so a crash mid-save leaves the previous file
    /// intact rather than a truncated one.
    pub fn save(&self, license_key: &str) -> VaultResult<()> {
        let record = seal(&self.key, license_key.as_bytes())?;
        let encoded = record.to_base64();

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(encoded.as_bytes())?;
        tmp.persist(&self.path)
            .map_err(|e| VaultError::FileUnavailable(e.error))?;

        debug!(path = %self.path.display(), "saved license record");
        Ok(())
    }

    /// Reads back the stored license key.
    ///
    /// # Errors
    ///
    /// - [`VaultError::FileUnavailable`] when the file cannot be read.
    /// - [`VaultError::CorruptRecord`] on non-UTF-8 file contents, bad
    ///   base64, a truncated frame, or non-UTF-8 plaintext.
    /// - [`VaultError::AuthenticationFailed`] when the record fails GCM
    ///   authentication.
    pub fn read(&self) -> VaultResult<String> {
        // Only the byte read counts as I/O failure; anything wrong with
        // the bytes themselves is corruption, not unavailability.
        let bytes = std::fs::read(&self.path)?;
        let encoded = std::str::from_utf8(&bytes)
            .map_err(|e| VaultError::CorruptRecord(format!("file is not UTF-8 text: {e}")))?;
        let record = EncryptedRecord::from_base64(encoded)?;
        let plaintext = open(&self.key, &record)?;

        String::from_utf8(plaintext)
            .map_err(|e| VaultError::CorruptRecord(format!("invalid UTF-8: {e}")))
    }
}
