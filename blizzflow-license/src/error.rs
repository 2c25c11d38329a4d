//! Error types for the licensing module.

use thiserror::Error;

/// Licensing-specific errors.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// A platform identifier query failed or produced no usable output.
    /// The only externally retriable error in this module.
    #[error("machine identity unavailable: {0}")]
    IdentityUnavailable(String),

    /// Wrong segment count, segment length, or segment encoding.
    #[error("malformed license key: {0}")]
    MalformedKey(String),

    /// The expiration segment is not parseable as hex.
    #[error("malformed expiration segment: {0}")]
    MalformedExpiration(String),

    /// Structurally valid but past its expiration instant.
    #[error("license expired on {0}")]
    Expired(chrono::DateTime<chrono::Utc>),

    /// The key was generated for a different machine.
    #[error("license key does not match this machine")]
    FingerprintMismatch,

    /// Empty or otherwise unusable username.
    #[error("invalid username provided")]
    InvalidUsername,
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
