//! Storage layer for the contact book
//!
//! Provides the encrypted single-file contact store and the atomic file
//! writes it is built on.

pub mod encrypted_store;
pub mod file_io;

pub use encrypted_store::EncryptedStore;
pub use file_io::{read_bytes, write_bytes_atomic};
