//! Contact Book - single-user encrypted contact manager
//!
//! This library provides the core functionality for a terminal contact book.
//! Contacts are kept in one encrypted file next to a generated key file, and
//! every change is recorded in an append-only audit log.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory, file locations and settings
//! - `error`: Custom error types
//! - `models`: The contact record and its field selector
//! - `crypto`: Key file management and authenticated encryption
//! - `storage`: Encrypted contact store with atomic writes
//! - `services`: The contact book operations
//! - `audit`: Audit logging system
//! - `backup`: Backups of the encrypted store
//! - `display`: Terminal formatting of contacts
//! - `cli`: Interactive menu
//!
//! # Example
//!
//! ```rust,ignore
//! use contact_book::audit::AuditLogger;
//! use contact_book::config::ContactPaths;
//! use contact_book::crypto::KeyStore;
//! use contact_book::models::{Contact, ContactField};
//! use contact_book::services::ContactBook;
//! use contact_book::storage::EncryptedStore;
//!
//! let paths = ContactPaths::new()?;
//! let store = EncryptedStore::from_key_store(&KeyStore::new(paths.key_file()))?;
//! let logger = AuditLogger::new(paths.audit_log());
//! let mut book = ContactBook::open(store, paths.store_file(), Box::new(logger))?;
//!
//! book.add(Contact::new("Alice", "555-0100"))?;
//! let found = book.search(ContactField::Name, "ali");
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{ContactError, ContactResult};
