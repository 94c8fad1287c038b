//! AES-256-GCM encryption/decryption
//!
//! Provides authenticated encryption for the contact store. Each encryption
//! generates a unique nonce, which is written in front of the ciphertext so
//! the blob can be decrypted later with only the key:
//!
//! ```text
//! version (1 byte) | nonce (12 bytes) | ciphertext + tag
//! ```

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};

use crate::error::{ContactError, ContactResult};

use super::EncryptionKey;

/// Current blob format version
const FORMAT_VERSION: u8 = 1;

/// Size of the AES-GCM nonce in bytes (96 bits)
const NONCE_SIZE: usize = 12;

/// Size of the AES-GCM authentication tag in bytes
const TAG_SIZE: usize = 16;

const HEADER_SIZE: usize = 1 + NONCE_SIZE;

/// An AES-256-GCM cipher bound to one key
#[derive(Clone)]
pub struct Cipher {
    inner: Aes256Gcm,
}

impl Cipher {
    /// Create a cipher from a key
    pub fn new(key: &EncryptionKey) -> ContactResult<Self> {
        let inner = Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| ContactError::Storage(format!("Failed to create cipher: {}", e)))?;
        Ok(Self { inner })
    }

    /// Encrypt plaintext under a fresh random nonce
    pub fn encrypt(&self, plaintext: &[u8]) -> ContactResult<Vec<u8>> {
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .inner
            .encrypt(nonce, plaintext)
            .map_err(|e| ContactError::Storage(format!("Encryption failed: {}", e)))?;

        let mut blob = Vec::with_capacity(HEADER_SIZE + ciphertext.len());
        blob.push(FORMAT_VERSION);
        blob.extend_from_slice(&nonce_bytes);
        blob.extend_from_slice(&ciphertext);
        Ok(blob)
    }

    /// Decrypt a blob produced by `encrypt`
    ///
    /// Fails if the blob is truncated, has an unknown version, or does not
    /// authenticate under this key.
    pub fn decrypt(&self, blob: &[u8]) -> ContactResult<Vec<u8>> {
        if blob.len() < HEADER_SIZE + TAG_SIZE {
            return Err(ContactError::Decryption(format!(
                "Ciphertext too short: {} bytes",
                blob.len()
            )));
        }

        let (header, ciphertext) = blob.split_at(HEADER_SIZE);
        if header[0] != FORMAT_VERSION {
            return Err(ContactError::Decryption(format!(
                "Unsupported encryption version: {}",
                header[0]
            )));
        }
        let nonce = Nonce::from_slice(&header[1..]);

        self.inner.decrypt(nonce, ciphertext).map_err(|_| {
            ContactError::Decryption("Decryption failed: invalid key or corrupted data".to_string())
        })
    }
}
