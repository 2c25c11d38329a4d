//! Licensing core for BlizzFlow.
//!
//! This crate handles:
//! - Hardware fingerprinting (processor id + disk serial, SHA-256)
//! - Four-segment hex license keys bound to the machine fingerprint
//! - Structure, expiry, and machine-binding validation
//!
//! # Key format
//!
//! `SSSSSSSS-SSSSSSSS-SSSSSSSS-SSSSSSSS`: exactly 35 characters, four
//! segments of 8 lowercase-hex characters. Segment 1 encodes the username
//! (lossily), segment 2 the machine fingerprint, segment 3 the expiration
//! timestamp, segment 4 is random.
//!
//! # What validation does *not* prove
//!
//! Keys carry no signature or MAC. [`validate_license_key`] proves that a
//! key is well-formed, unexpired, and bound to this machine — not that it
//! was issued by anyone in particular. Do not treat a passing validation
//! as proof of authenticity.

mod error;
mod key;
mod machine;
mod service;

pub use error::{LicenseError, LicenseResult};
pub use key::{
    License, MAX_ENCODABLE_TIMESTAMP, SEGMENT_COUNT, SEGMENT_LENGTH, decode_license_key,
    generate_license_key, validate_license_key,
};
pub use machine::{HardwareIdentity, MachineIdentity};
pub use service::LicenseService;
