//! Error types for the license vault.

use thiserror::Error;

/// Result type for vault operations.
pub type VaultResult<T> = Result<T, VaultError>;

/// Errors that can occur storing or retrieving the license file.
///
/// Every failure path is fail-closed: no plaintext is ever returned
/// alongside an error, and none of these are retried internally.
#[derive(Debug, Error)]
pub enum VaultError {
    /// The license file could not be read or written.
    #[error("license file unavailable: {0}")]
    FileUnavailable(#[from] std::io::Error),

    /// The file's contents are not a well-formed sealed record.
    #[error("corrupt license file: {0}")]
    CorruptRecord(String),

    /// GCM authentication failed: wrong key, a flipped bit, or truncation.
    /// The three are indistinguishable by design.
    #[error("license file tampered with or corrupt (authentication failed)")]
    AuthenticationFailed,

    /// Sealing failed.
    #[error("encryption failed: {0}")]
    Encryption(String),
}
