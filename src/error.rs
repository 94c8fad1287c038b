//! Custom error types for the contact book
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for contact book operations
#[derive(Error, Debug)]
pub enum ContactError {
    /// The encryption key could not be read or created
    #[error("Key file error: {0}")]
    KeyAccess(String),

    /// Ciphertext is corrupt, truncated, or was encrypted under another key
    #[error("Decryption error: {0}")]
    Decryption(String),

    /// Decrypted data is not a valid contact list
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// A field name that does not name a contact attribute
    #[error("Invalid field '{0}': expected one of name, phone, email, address, category")]
    InvalidField(String),

    /// Validation errors for contact data
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ContactError {
    /// Errors that `EncryptedStore::load` degrades to an empty contact list
    pub fn is_recoverable_load_error(&self) -> bool {
        matches!(self, Self::Decryption(_) | Self::Deserialization(_))
    }
}

impl From<std::io::Error> for ContactError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ContactError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for contact book operations
pub type ContactResult<T> = Result<T, ContactError>;
