//! Encrypted on-disk storage for the active BlizzFlow license.
//!
//! One file, one record: `base64(nonce(12) || AES-256-GCM ciphertext ||
//! tag(16))`. The vault encrypts and decrypts opaque license-key text; it
//! never looks inside a license. Tampering anywhere in the stored record
//! is detected by GCM authentication and reported, never silently repaired.

mod error;
mod record;
mod store;
mod store_key;

pub use error::{VaultError, VaultResult};
pub use record::{EncryptedRecord, NONCE_SIZE, TAG_SIZE, open, seal};
pub use store::LicenseStore;
pub use store_key::{KEY_SIZE, StoreKey};
