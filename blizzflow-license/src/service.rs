//! Licensing workflow over an injectable identity source.

use crate::error::{LicenseError, LicenseResult};
use crate::key::{License, decode_license_key, generate_license_key, validate_license_key};
use crate::machine::MachineIdentity;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

/// High-level licensing operations: issue, decode, validate.
///
/// Owns the [`MachineIdentity`] seam so callers and tests can substitute
/// the fingerprint source without touching the codec.
pub struct LicenseService {
    identity: Arc<dyn MachineIdentity>,
}

impl LicenseService {
    /// Creates a service over the given identity source.
    pub fn new(identity: Arc<dyn MachineIdentity>) -> Self {
        Self { identity }
    }

    /// Issues a license for `username` expiring at `expires_at`.
    ///
    /// # Errors
    ///
    /// [`LicenseError::InvalidUsername`] for an empty username;
    /// [`LicenseError::IdentityUnavailable`] when the fingerprint query
    /// fails.
    pub fn generate(&self, username: &str, expires_at: DateTime<Utc>) -> LicenseResult<License> {
        if username.is_empty() {
            return Err(LicenseError::InvalidUsername);
        }

        let license = generate_license_key(self.identity.as_ref(), username, expires_at)?;
        debug!(key = %license.key, %expires_at, "generated license");
        Ok(license)
    }

    /// Decodes a key and rejects it if already expired.
    ///
    /// Use [`decode_license_key`] directly to inspect an expired key
    /// without the expiry check.
    pub fn decode(&self, key: &str) -> LicenseResult<License> {
        if key.is_empty() {
            return Err(LicenseError::MalformedKey("empty key".into()));
        }

        let license = decode_license_key(key)?;
        if Utc::now() > license.expires_at {
            return Err(LicenseError::Expired(license.expires_at));
        }
        Ok(license)
    }

    /// Checks structure, expiry, and machine binding of `key`.
    pub fn validate(&self, key: &str) -> LicenseResult<()> {
        if key.is_empty() {
            return Err(LicenseError::MalformedKey("empty key".into()));
        }

        validate_license_key(self.identity.as_ref(), key)?;
        debug!(%key, "license validated");
        Ok(())
    }
}
