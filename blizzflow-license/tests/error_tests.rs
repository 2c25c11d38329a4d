use blizzflow_license::LicenseError;
use chrono::{TimeZone, Utc};

#[test]
fn error_display_identity_unavailable() {
    let err = LicenseError::IdentityUnavailable("wmic failed".into());
    let msg = format!("{err}");
    assert!(msg.contains("machine identity unavailable"));
    assert!(msg.contains("wmic failed"));
}

#[test]
fn error_display_malformed_key() {
    let err = LicenseError::MalformedKey("expected 4 segments, got 2".into());
    let msg = format!("{err}");
    assert!(msg.contains("malformed license key"));
    assert!(msg.contains("4 segments"));
}

#[test]
fn error_display_malformed_expiration() {
    let err = LicenseError::MalformedExpiration("invalid digit".into());
    assert!(format!("{err}").contains("expiration"));
}

#[test]
fn error_display_expired() {
    let expires_at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let err = LicenseError::Expired(expires_at);
    let msg = format!("{err}");
    assert!(msg.contains("expired"));
    assert!(msg.contains("2023"));
}

#[test]
fn error_display_fingerprint_mismatch() {
    let err = LicenseError::FingerprintMismatch;
    assert!(format!("{err}").contains("does not match this machine"));
}

#[test]
fn error_display_invalid_username() {
    let err = LicenseError::InvalidUsername;
    assert!(format!("{err}").contains("invalid username"));
}

#[test]
fn error_is_debug() {
    let err = LicenseError::FingerprintMismatch;
    let _ = format!("{err:?}");
}
