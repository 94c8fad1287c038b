//! Cryptographic functions for the contact book
//!
//! Provides AES-256-GCM encryption of the store file and management of the
//! key file that holds its key.

pub mod encryption;
pub mod key_store;

pub use encryption::Cipher;
pub use key_store::{EncryptionKey, KeyStore, KEY_SIZE};
