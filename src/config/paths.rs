//! Path management for the contact book
//!
//! ## Path Resolution Order
//!
//! 1. `CONTACT_BOOK_DATA_DIR` environment variable (if set)
//! 2. The current working directory
//!
//! File names inside the data directory come from [`Settings`] and default to
//! `encryption.key`, `contacts.encrypted` and `contact_system.log`.

use std::path::PathBuf;

use super::settings::Settings;
use crate::error::ContactError;

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "CONTACT_BOOK_DATA_DIR";

/// Name of the optional settings file
const SETTINGS_FILE: &str = "contact_book.json";

/// Manages all paths used by the contact book
#[derive(Debug, Clone)]
pub struct ContactPaths {
    /// Directory holding the key, store, log and backups
    base_dir: PathBuf,
    key_file: String,
    store_file: String,
    audit_log_file: String,
}

impl ContactPaths {
    /// Resolve the data directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn new() -> Result<Self, ContactError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) => PathBuf::from(custom),
            None => std::env::current_dir().map_err(|e| {
                ContactError::Config(format!("Could not determine working directory: {}", e))
            })?,
        };

        Ok(Self::with_base_dir(base_dir))
    }

    /// Create ContactPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        let defaults = Settings::default();
        Self {
            base_dir,
            key_file: defaults.key_file,
            store_file: defaults.store_file,
            audit_log_file: defaults.audit_log_file,
        }
    }

    /// Take file names from loaded settings
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.key_file = settings.key_file.clone();
        self.store_file = settings.store_file.clone();
        self.audit_log_file = settings.audit_log_file.clone();
        self
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join(SETTINGS_FILE)
    }

    /// Get the path to the raw key file
    pub fn key_file(&self) -> PathBuf {
        self.base_dir.join(&self.key_file)
    }

    /// Get the path to the encrypted contact store
    pub fn store_file(&self) -> PathBuf {
        self.base_dir.join(&self.store_file)
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join(&self.audit_log_file)
    }

    /// Get the backup directory
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Ensure the data and backup directories exist
    pub fn ensure_directories(&self) -> Result<(), ContactError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ContactError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| ContactError::Io(format!("Failed to create backup directory: {}", e)))?;

        Ok(())
    }
}
