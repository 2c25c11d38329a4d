//! Property-based tests for record sealing.
//!
//! These verify the properties the store relies on:
//! - Sealing is reversible with the correct key
//! - Wrong keys fail authentication
//! - Tampering anywhere in the record is detected
//! - Nonces never repeat across seals

use blizzflow_vault::{EncryptedRecord, NONCE_SIZE, StoreKey, open, seal};
use proptest::prelude::*;

fn key_strategy() -> impl Strategy<Value = StoreKey> {
    prop::array::uniform32(any::<u8>()).prop_map(StoreKey::from_bytes)
}

fn plaintext_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..2000)
}

proptest! {
    #[test]
    fn roundtrip_preserves_plaintext(key in key_strategy(), plaintext in plaintext_strategy()) {
        let record = seal(&key, &plaintext).unwrap();
        let opened = open(&key, &record).unwrap();
        prop_assert_eq!(opened, plaintext);
    }

    #[test]
    fn base64_framing_roundtrips(key in key_strategy(), plaintext in plaintext_strategy()) {
        let record = seal(&key, &plaintext).unwrap();
        let reframed = EncryptedRecord::from_base64(&record.to_base64()).unwrap();
        prop_assert_eq!(reframed.nonce, record.nonce);
        prop_assert_eq!(reframed.ciphertext, record.ciphertext);
    }

    #[test]
    fn wrong_key_fails(plaintext in plaintext_strategy()) {
        let record = seal(&StoreKey::from_bytes([0xAA; 32]), &plaintext).unwrap();
        prop_assert!(open(&StoreKey::from_bytes([0xBB; 32]), &record).is_err());
    }

    #[test]
    fn bit_flip_anywhere_is_detected(
        key in key_strategy(),
        plaintext in plaintext_strategy(),
        position in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let mut record = seal(&key, &plaintext).unwrap();
        let total = NONCE_SIZE + record.ciphertext.len();
        let target = position.index(total);
        if target < NONCE_SIZE {
            record.nonce[target] ^= 1 << bit;
        } else {
            record.ciphertext[target - NONCE_SIZE] ^= 1 << bit;
        }
        prop_assert!(open(&key, &record).is_err());
    }

    #[test]
    fn nonces_are_unique_per_seal(key in key_strategy(), plaintext in plaintext_strategy()) {
        let first = seal(&key, &plaintext).unwrap();
        let second = seal(&key, &plaintext).unwrap();
        prop_assert_ne!(first.nonce, second.nonce);
    }
}
