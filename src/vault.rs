// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Provenance Labs

//! Passphrase encryption of account private-key material.
//!
//! Keys are encrypted with AES-256-CBC under a fixed all-zero IV and PKCS#7
//! padding, and stored hex-encoded. The zero IV makes the scheme fully
//! deterministic: the same key and passphrase always produce the same
//! ciphertext. This is a compatibility contract with the existing stored
//! ciphertexts and must not be changed without a key-material migration.
//!
//! The 256-bit cipher key is derived from the passphrase with SHAKE256, so
//! passphrases of any length are accepted.
//!
//! CBC/PKCS#7 does not authenticate the plaintext. A wrong passphrase is
//! almost always caught by the padding check ([`KeyError::Decrypt`]); the
//! rare survivor yields garbage that fails account-key parsing downstream.
//! Callers must treat every failure on this path as "caller not authorized"
//! and never surface the raw error to end users.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::Shake256;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Fixed initialization vector (compatibility contract).
const IV: [u8; 16] = [0u8; 16];

/// Errors raised when decrypting stored key material.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("ciphertext is not valid hex: {0}")]
    Encoding(String),

    #[error("decryption failed")]
    Decrypt,
}

/// Derive the 256-bit cipher key for a passphrase.
fn derive_cipher_key(passphrase: &str) -> [u8; 32] {
    let mut hasher = Shake256::default();
    hasher.update(passphrase.as_bytes());
    let mut reader = hasher.finalize_xof();
    let mut key = [0u8; 32];
    reader.read(&mut key);
    key
}

/// Encrypt private-key material under a passphrase.
///
/// Returns the hex-encoded ciphertext. Deterministic: identical inputs
/// produce identical output.
pub fn encrypt(plaintext: &[u8], passphrase: &str) -> String {
    let key = derive_cipher_key(passphrase);
    let ciphertext =
        Aes256CbcEnc::new(&key.into(), &IV.into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext);
    alloy::hex::encode(ciphertext)
}

/// Decrypt hex-encoded ciphertext produced by [`encrypt`].
///
/// Fails with [`KeyError`] when the ciphertext is malformed or the padding
/// check rejects the passphrase.
pub fn decrypt(ciphertext_hex: &str, passphrase: &str) -> Result<Vec<u8>, KeyError> {
    let ciphertext =
        alloy::hex::decode(ciphertext_hex).map_err(|e| KeyError::Encoding(e.to_string()))?;
    let key = derive_cipher_key(passphrase);
    Aes256CbcDec::new(&key.into(), &IV.into())
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|_| KeyError::Decrypt)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_KEY: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    #[test]
    fn encrypt_decrypt_round_trip() {
        let ciphertext = encrypt(SAMPLE_KEY.as_bytes(), "correct horse battery");
        let plaintext = decrypt(&ciphertext, "correct horse battery").unwrap();
        assert_eq!(plaintext, SAMPLE_KEY.as_bytes());
    }

    #[test]
    fn encryption_is_deterministic() {
        // Zero IV: same key + passphrase must reproduce the stored ciphertext.
        let a = encrypt(SAMPLE_KEY.as_bytes(), "pass");
        let b = encrypt(SAMPLE_KEY.as_bytes(), "pass");
        assert_eq!(a, b);
    }

    #[test]
    fn wrong_passphrase_never_yields_plaintext() {
        let ciphertext = encrypt(SAMPLE_KEY.as_bytes(), "right");
        match decrypt(&ciphertext, "wrong") {
            Err(KeyError::Decrypt) => {}
            Err(KeyError::Encoding(_)) => panic!("ciphertext was valid hex"),
            Ok(plaintext) => assert_ne!(plaintext, SAMPLE_KEY.as_bytes()),
        }
    }

    #[test]
    fn malformed_hex_is_rejected() {
        let result = decrypt("not-hex-at-all", "pass");
        assert!(matches!(result, Err(KeyError::Encoding(_))));
    }

    #[test]
    fn truncated_ciphertext_is_rejected() {
        let ciphertext = encrypt(SAMPLE_KEY.as_bytes(), "pass");
        // Drop one hex pair so the ciphertext is no longer block-aligned.
        let truncated = &ciphertext[..ciphertext.len() - 2];
        assert!(matches!(decrypt(truncated, "pass"), Err(KeyError::Decrypt)));
    }

    #[test]
    fn round_trip_with_long_passphrase() {
        let passphrase = "a".repeat(200);
        let ciphertext = encrypt(b"short secret", &passphrase);
        assert_eq!(decrypt(&ciphertext, &passphrase).unwrap(), b"short secret");
    }
}
