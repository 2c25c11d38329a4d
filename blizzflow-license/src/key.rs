//! License key encoding, decoding, and validation.
//!
//! Keys are four 8-character lowercase-hex segments joined by `-`:
//! `SSSSSSSS-SSSSSSSS-SSSSSSSS-SSSSSSSS` (35 characters total).
//!
//! - Segment 1 is a lossy encoding of the username: salted XOR, then a
//!   bitwise AND with fresh random bytes. The AND discards bits, so the
//!   username is not exactly recoverable from the key.
//! - Segment 2 is a salted XOR of the first fingerprint bytes. It is
//!   deterministic for a given machine, which is what validation compares.
//! - Segment 3 is the expiration Unix timestamp in hex, fixed to 8 digits.
//! - Segment 4 is random and carries no meaning; it only keeps repeated
//!   keys from being predictable.
//!
//! No signature or MAC covers the key. Validation proves structure, expiry,
//! and machine binding, never provenance: anyone with this encoder can mint
//! a key that validates on a machine whose fingerprint they can compute.

use crate::error::{LicenseError, LicenseResult};
use crate::machine::MachineIdentity;
use chrono::{DateTime, TimeZone, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Number of segments in a license key.
pub const SEGMENT_COUNT: usize = 4;

/// Characters per segment.
pub const SEGMENT_LENGTH: usize = 8;

/// Single-byte XOR salt applied in segments 1 and 2.
const SALT_KEY: u8 = 0x5A;

/// Segment separator.
const SEPARATOR: char = '-';

/// Largest Unix timestamp that survives the 8-hex-digit expiration segment
/// intact (2106-02-07T06:28:15Z). Later instants lose their high-order bits
/// to the fixed-width encoding.
pub const MAX_ENCODABLE_TIMESTAMP: i64 = u32::MAX as i64;

/// An issued or decoded license. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    /// The 35-character key text.
    pub key: String,
    /// Originating account name. Advisory: exact after generation,
    /// best-effort after decoding (segment 1 is lossy), `None` when nothing
    /// usable could be recovered.
    pub username: Option<String>,
    /// Absolute expiration instant, second precision.
    pub expires_at: DateTime<Utc>,
    /// Machine fingerprint: the full 64-hex digest after generation, the
    /// raw 8-character segment text after decoding.
    pub fingerprint: String,
}

/// Generates a license key for `username` on the current machine.
///
/// The returned [`License`] carries the username as given, not the lossy
/// re-encoding embedded in segment 1.
///
/// # Errors
///
/// [`LicenseError::IdentityUnavailable`] when the fingerprint query fails.
pub fn generate_license_key(
    identity: &dyn MachineIdentity,
    username: &str,
    expires_at: DateTime<Utc>,
) -> LicenseResult<License> {
    let fingerprint = identity.fingerprint()?;

    let key = format!(
        "{}-{}-{}-{}",
        encode_username(username),
        encode_fingerprint(&fingerprint),
        encode_expiration(expires_at),
        random_tail(),
    );

    Ok(License {
        key,
        username: Some(username.to_string()),
        expires_at,
        fingerprint,
    })
}

/// Decodes an existing key back into a [`License`].
///
/// Succeeds on an already-expired key; expiry is the caller's check (see
/// [`LicenseService::decode`](crate::LicenseService::decode)). The recovered
/// username is best-effort only and the fingerprint field holds the raw
/// segment text, not the original digest.
pub fn decode_license_key(key: &str) -> LicenseResult<License> {
    let segments = split_segments(key)?;

    let username = recover_username(segments[0])?;
    let fingerprint = segments[1].to_string();
    let expires_at = parse_expiration(segments[2])?;

    Ok(License {
        key: key.to_string(),
        username,
        expires_at,
        fingerprint,
    })
}

/// Checks structure, expiry, and machine binding of `key`.
///
/// # Errors
///
/// - [`LicenseError::MalformedKey`] on a structural violation.
/// - [`LicenseError::MalformedExpiration`] on a non-hex segment 3.
/// - [`LicenseError::Expired`] when the expiration instant has passed.
/// - [`LicenseError::IdentityUnavailable`] when the fingerprint query fails.
/// - [`LicenseError::FingerprintMismatch`] when segment 2 was not produced
///   from this machine's fingerprint.
pub fn validate_license_key(identity: &dyn MachineIdentity, key: &str) -> LicenseResult<()> {
    let segments = split_segments(key)?;

    let expires_at = parse_expiration(segments[2])?;
    if Utc::now() > expires_at {
        return Err(LicenseError::Expired(expires_at));
    }

    let fingerprint = identity.fingerprint()?;
    if segments[1] != encode_fingerprint(&fingerprint) {
        return Err(LicenseError::FingerprintMismatch);
    }

    Ok(())
}

/// Fixes `s` to exactly [`SEGMENT_LENGTH`] characters: left-pads with `0`,
/// or keeps the last [`SEGMENT_LENGTH`] characters when too long (this is
/// where over-wide expiration timestamps lose their high-order digits).
fn pad_segment(mut s: String) -> String {
    if s.len() > SEGMENT_LENGTH {
        return s.split_off(s.len() - SEGMENT_LENGTH);
    }
    format!("{s:0>width$}", width = SEGMENT_LENGTH)
}

/// Lossy username segment: first 4 bytes, `_`-padded, each XORed with the
/// salt and then ANDed with a fresh random byte. The AND zeroes bits
/// irrecoverably; this segment is deliberately not an encoding that
/// round-trips.
fn encode_username(username: &str) -> String {
    let name = username.as_bytes();

    let mut mask = [0u8; 4];
    rand::rngs::OsRng.fill_bytes(&mut mask);

    let mut masked = [0u8; 4];
    for (i, out) in masked.iter_mut().enumerate() {
        let b = name.get(i).copied().unwrap_or(b'_');
        *out = (b ^ SALT_KEY) & mask[i];
    }

    pad_segment(hex::encode(masked))
}

/// Deterministic fingerprint segment: first 4 bytes of the digest text,
/// XORed with the salt. Validation re-derives this from the live
/// fingerprint and compares byte-for-byte.
fn encode_fingerprint(fingerprint: &str) -> String {
    let salted: Vec<u8> = fingerprint
        .bytes()
        .take(4)
        .map(|b| b ^ SALT_KEY)
        .collect();
    pad_segment(hex::encode(salted))
}

fn encode_expiration(expires_at: DateTime<Utc>) -> String {
    pad_segment(format!("{:x}", expires_at.timestamp()))
}

fn random_tail() -> String {
    let mut tail = [0u8; 4];
    rand::rngs::OsRng.fill_bytes(&mut tail);
    pad_segment(hex::encode(tail))
}

fn split_segments(key: &str) -> LicenseResult<Vec<&str>> {
    let segments: Vec<&str> = key.split(SEPARATOR).collect();
    if segments.len() != SEGMENT_COUNT {
        return Err(LicenseError::MalformedKey(format!(
            "expected {SEGMENT_COUNT} segments, got {}",
            segments.len()
        )));
    }
    for (i, segment) in segments.iter().enumerate() {
        if segment.len() != SEGMENT_LENGTH {
            return Err(LicenseError::MalformedKey(format!(
                "segment {i} has length {}, expected {SEGMENT_LENGTH}",
                segment.len()
            )));
        }
    }
    Ok(segments)
}

/// Best-effort reversal of the username segment: undo the hex framing and
/// trailing padding only. Bits destroyed by the random mask at generation
/// time stay lost, so the result may differ from the original username.
fn recover_username(segment: &str) -> LicenseResult<Option<String>> {
    let mut hex_text = segment.trim_end_matches('0').to_string();
    if hex_text.len() % 2 != 0 {
        hex_text.insert(0, '0');
    }

    let bytes = hex::decode(&hex_text)
        .map_err(|e| LicenseError::MalformedKey(format!("username segment: {e}")))?;

    let Ok(text) = String::from_utf8(bytes) else {
        return Ok(None);
    };
    let name = text.trim_end_matches('_');
    if name.is_empty() {
        Ok(None)
    } else {
        Ok(Some(name.to_string()))
    }
}

fn parse_expiration(segment: &str) -> LicenseResult<DateTime<Utc>> {
    let timestamp = u64::from_str_radix(segment, 16)
        .map_err(|e| LicenseError::MalformedExpiration(e.to_string()))?;

    Utc.timestamp_opt(timestamp as i64, 0)
        .single()
        .ok_or_else(|| {
            LicenseError::MalformedExpiration(format!("timestamp {timestamp:#x} out of range"))
        })
}
