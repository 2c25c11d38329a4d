//! Shared test helpers for licensing tests.

#![allow(dead_code)]

use blizzflow_license::{LicenseError, LicenseResult, MachineIdentity};

/// A realistic SHA-256-style digest for one simulated machine.
pub const DIGEST_A: &str = "a3f1c2d4e5b697881122334455667788a3f1c2d4e5b697881122334455667788";

/// A digest for a different simulated machine.
pub const DIGEST_B: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

/// Identity source returning a fixed digest.
pub struct FixedIdentity(pub &'static str);

impl MachineIdentity for FixedIdentity {
    fn fingerprint(&self) -> LicenseResult<String> {
        Ok(self.0.to_string())
    }
}

/// Identity source that always fails, as when the OS query is unavailable.
pub struct FailingIdentity;

impl MachineIdentity for FailingIdentity {
    fn fingerprint(&self) -> LicenseResult<String> {
        Err(LicenseError::IdentityUnavailable(
            "hardware query disabled".into(),
        ))
    }
}
