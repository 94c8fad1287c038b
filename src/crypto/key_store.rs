//! Key file management
//!
//! Loads the store's AES-256 key from a key file, generating and persisting a
//! fresh random key on first use. The file holds the raw key bytes with no
//! header. There is no rotation: losing or replacing the file makes the
//! existing store unreadable.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{ContactError, ContactResult};

/// Key length for AES-256
pub const KEY_SIZE: usize = 32;

/// A symmetric encryption key, zeroed when dropped
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionKey {
    bytes: [u8; KEY_SIZE],
}

impl EncryptionKey {
    /// Generate a new random key from the OS RNG
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Build a key from raw bytes, which must be exactly `KEY_SIZE` long
    pub fn from_slice(bytes: &[u8]) -> ContactResult<Self> {
        if bytes.len() != KEY_SIZE {
            return Err(ContactError::KeyAccess(format!(
                "Invalid key length: expected {} bytes, got {}",
                KEY_SIZE,
                bytes.len()
            )));
        }

        let mut key = [0u8; KEY_SIZE];
        key.copy_from_slice(bytes);
        Ok(Self { bytes: key })
    }

    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

// Never print key material
impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncryptionKey([REDACTED {} bytes])", KEY_SIZE)
    }
}

/// Loads or creates the key file
#[derive(Debug, Clone)]
pub struct KeyStore {
    path: PathBuf,
}

impl KeyStore {
    /// Create a key store backed by the given key file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Return the stored key, creating the key file on first call
    pub fn get_key(&self) -> ContactResult<EncryptionKey> {
        if self.path.exists() {
            let mut bytes = fs::read(&self.path).map_err(|e| {
                ContactError::KeyAccess(format!(
                    "Failed to read key file {}: {}",
                    self.path.display(),
                    e
                ))
            })?;
            let key = EncryptionKey::from_slice(&bytes);
            bytes.zeroize();
            return key;
        }

        let key = EncryptionKey::generate();
        self.write_key(&key)?;
        Ok(key)
    }

    fn write_key(&self, key: &EncryptionKey) -> ContactResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ContactError::KeyAccess(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path).map_err(|e| {
            ContactError::KeyAccess(format!(
                "Failed to create key file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        file.write_all(key.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| ContactError::KeyAccess(format!("Failed to write key file: {}", e)))
    }
}
