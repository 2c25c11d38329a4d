//! Sealed license records: AES-256-GCM with a random nonce, base64 framed.
//!
//! The on-disk layout is `base64(nonce(12) || ciphertext || tag(16))` with
//! the standard alphabet and padding. One record per file, no envelope
//! metadata, no versioning.

use crate::error::{VaultError, VaultResult};
use crate::store_key::StoreKey;
use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Size of nonce in bytes (96 bits for AES-GCM).
pub const NONCE_SIZE: usize = 12;

/// Size of the GCM authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// A sealed record: nonce plus ciphertext (auth tag appended).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EncryptedRecord {
    /// The nonce used for sealing (unique per seal).
    pub nonce: [u8; NONCE_SIZE],
    /// The ciphertext, auth tag included.
    pub ciphertext: Vec<u8>,
}

impl EncryptedRecord {
    /// Returns the total framed size of the record.
    pub fn len(&self) -> usize {
        NONCE_SIZE + self.ciphertext.len()
    }

    /// Returns true if the ciphertext is empty.
    pub fn is_empty(&self) -> bool {
        self.ciphertext.is_empty()
    }

    /// Encodes to the on-disk base64 form.
    pub fn to_base64(&self) -> String {
        let mut bytes = Vec::with_capacity(self.len());
        bytes.extend_from_slice(&self.nonce);
        bytes.extend_from_slice(&self.ciphertext);
        STANDARD.encode(&bytes)
    }

    /// Decodes from the on-disk base64 form.
    ///
    /// # Errors
    ///
    /// [`VaultError::CorruptRecord`] on invalid base64 or a record shorter
    /// than a nonce plus a tag.
    pub fn from_base64(encoded: &str) -> VaultResult<Self> {
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| VaultError::CorruptRecord(format!("invalid base64: {e}")))?;

        if bytes.len() < NONCE_SIZE + TAG_SIZE {
            return Err(VaultError::CorruptRecord("record too short".to_string()));
        }

        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(&bytes[..NONCE_SIZE]);
        let ciphertext = bytes[NONCE_SIZE..].to_vec();

        Ok(Self { nonce, ciphertext })
    }
}

/// Seals `plaintext` under `key`.
///
/// A fresh nonce is drawn from the OS RNG on every call; nonce reuse under
/// the same key voids both the confidentiality and the integrity of GCM.
pub fn seal(key: &StoreKey, plaintext: &[u8]) -> VaultResult<EncryptedRecord> {
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| VaultError::Encryption(e.to_string()))?;

    Ok(EncryptedRecord {
        nonce: nonce_bytes,
        ciphertext,
    })
}

/// Opens a sealed record, authenticating it in the process.
///
/// Fails closed: a wrong key, a flipped bit anywhere in the record, and a
/// truncated ciphertext all surface as [`VaultError::AuthenticationFailed`]
/// and no partial plaintext is ever returned.
pub fn open(key: &StoreKey, record: &EncryptedRecord) -> VaultResult<Vec<u8>> {
    let cipher = Aes256Gcm::new(key.as_bytes().into());
    let nonce = Nonce::from_slice(&record.nonce);

    cipher
        .decrypt(nonce, record.ciphertext.as_ref())
        .map_err(|_| VaultError::AuthenticationFailed)
}
