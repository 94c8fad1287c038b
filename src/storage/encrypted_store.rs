//! Encrypted contact store
//!
//! Serializes the full contact list to JSON, encrypts it as a single blob and
//! writes it to one file. There is no per-record addressing: every save
//! rewrites the whole file.

use std::path::Path;

use crate::crypto::{Cipher, EncryptionKey, KeyStore};
use crate::error::{ContactError, ContactResult};
use crate::models::Contact;

use super::file_io::{read_bytes, write_bytes_atomic};

/// Reads and writes the encrypted store file
#[derive(Clone)]
pub struct EncryptedStore {
    cipher: Cipher,
}

impl EncryptedStore {
    /// Create a store that encrypts with the given key
    pub fn new(key: &EncryptionKey) -> ContactResult<Self> {
        Ok(Self {
            cipher: Cipher::new(key)?,
        })
    }

    /// Create a store using the key held by a key file (created if missing)
    pub fn from_key_store(keys: &KeyStore) -> ContactResult<Self> {
        let key = keys.get_key()?;
        Self::new(&key)
    }

    /// Encrypt raw bytes
    pub fn encrypt(&self, plaintext: &[u8]) -> ContactResult<Vec<u8>> {
        self.cipher.encrypt(plaintext)
    }

    /// Decrypt raw bytes
    pub fn decrypt(&self, ciphertext: &[u8]) -> ContactResult<Vec<u8>> {
        self.cipher.decrypt(ciphertext)
    }

    /// Serialize, encrypt and atomically write all contacts to `path`
    pub fn save<P: AsRef<Path>>(&self, contacts: &[Contact], path: P) -> ContactResult<()> {
        let plaintext = serde_json::to_vec(contacts)
            .map_err(|e| ContactError::Json(format!("Failed to serialize contacts: {}", e)))?;
        let ciphertext = self.encrypt(&plaintext)?;
        write_bytes_atomic(path, &ciphertext)
    }

    /// Read the contacts at `path`, surfacing decryption and parse failures
    ///
    /// A missing file is a first run and yields an empty list.
    pub fn try_load<P: AsRef<Path>>(&self, path: P) -> ContactResult<Vec<Contact>> {
        let Some(ciphertext) = read_bytes(path)? else {
            return Ok(Vec::new());
        };

        let plaintext = self.decrypt(&ciphertext)?;
        serde_json::from_slice(&plaintext)
            .map_err(|e| ContactError::Deserialization(format!("Invalid contact data: {}", e)))
    }

    /// Read the contacts at `path`, treating an unreadable store as empty
    ///
    /// Decryption and parse failures yield an empty list. The next save then
    /// overwrites the unreadable file, so its contents are lost. Callers that
    /// need to tell the cases apart should use `try_load`. I/O errors other
    /// than a missing file are still returned.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> ContactResult<Vec<Contact>> {
        match self.try_load(path) {
            Err(e) if e.is_recoverable_load_error() => Ok(Vec::new()),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn test_store() -> EncryptedStore {
        EncryptedStore::new(&EncryptionKey::generate()).unwrap()
    }

    fn sample_contacts() -> Vec<Contact> {
        vec![
            Contact::new("Alice", "555-0100")
                .with_email("alice@example.com")
                .with_category("Friends"),
            Contact::new("Bob", "111").with_address("1 Main St"),
        ]
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store();

        let contacts = store.load(temp_dir.path().join("contacts.encrypted")).unwrap();
        assert!(contacts.is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("contacts.encrypted");
        let store = test_store();
        let contacts = sample_contacts();

        store.save(&contacts, &path).unwrap();
        let loaded = store.load(&path).unwrap();

        // Field-equal, timestamps included
        assert_eq!(loaded, contacts);
    }

    #[test]
    fn test_file_holds_no_plaintext() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("contacts.encrypted");
        let store = test_store();

        store.save(&sample_contacts(), &path).unwrap();

        let raw = fs::read(&path).unwrap();
        let text = String::from_utf8_lossy(&raw);
        assert!(!text.contains("Alice"));
        assert!(!text.contains("alice@example.com"));
    }

    #[test]
    fn test_same_key_from_key_file_reads_store() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("contacts.encrypted");
        let keys = KeyStore::new(temp_dir.path().join("encryption.key"));
        let contacts = sample_contacts();

        EncryptedStore::from_key_store(&keys)
            .unwrap()
            .save(&contacts, &path)
            .unwrap();

        let reopened = EncryptedStore::from_key_store(&keys).unwrap();
        assert_eq!(reopened.try_load(&path).unwrap(), contacts);
    }

    #[test]
    fn test_tampered_file_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("contacts.encrypted");
        let store = test_store();

        store.save(&sample_contacts(), &path).unwrap();
        let intact = fs::read(&path).unwrap();

        for i in 0..intact.len() {
            let mut tampered = intact.clone();
            tampered[i] ^= 0x01;
            fs::write(&path, &tampered).unwrap();

            assert!(store.load(&path).unwrap().is_empty(), "byte {} not detected", i);
            assert!(store.try_load(&path).is_err());
        }
    }

    #[test]
    fn test_wrong_key_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("contacts.encrypted");

        test_store().save(&sample_contacts(), &path).unwrap();

        let other = test_store();
        assert!(other.load(&path).unwrap().is_empty());
        assert!(matches!(
            other.try_load(&path),
            Err(ContactError::Decryption(_))
        ));
    }

    #[test]
    fn test_valid_ciphertext_with_bad_json_is_deserialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("contacts.encrypted");
        let store = test_store();

        let blob = store.encrypt(b"{not a list").unwrap();
        fs::write(&path, blob).unwrap();

        assert!(matches!(
            store.try_load(&path),
            Err(ContactError::Deserialization(_))
        ));
        assert!(store.load(&path).unwrap().is_empty());
    }

    #[test]
    fn test_save_empty_list() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("contacts.encrypted");
        let store = test_store();

        store.save(&sample_contacts(), &path).unwrap();
        store.save(&[], &path).unwrap();

        assert!(store.try_load(&path).unwrap().is_empty());
    }
}
