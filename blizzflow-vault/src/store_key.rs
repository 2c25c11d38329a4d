//! Key material for sealing license records.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of the store key in bytes (256 bits for AES-256).
pub const KEY_SIZE: usize = 32;

/// A 32-byte symmetric key for sealing license records.
///
/// Zeroed on drop and redacted from debug output. Key management is the
/// caller's concern: inject material with [`StoreKey::from_bytes`] (an OS
/// keychain, a per-install derivation), or fall back to the key baked into
/// the program with [`StoreKey::embedded`].
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct StoreKey {
    bytes: [u8; KEY_SIZE],
}

impl StoreKey {
    /// Creates a store key from raw bytes.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// The program's built-in key.
    ///
    /// Protects the license file against casual disclosure only: anyone
    /// with a copy of the binary can recover this constant.
    pub fn embedded() -> Self {
        Self {
            bytes: *b"blizzflow-static-encryption-key-",
        }
    }

    /// Returns the key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
