//! Backup system for the contact book
//!
//! Keeps rolling copies of the encrypted store file in `backups/` with a
//! count-based retention policy. Backups are taken when the program starts,
//! before the session can modify the store.
//!
//! # Example
//!
//! ```rust,ignore
//! use contact_book::backup::BackupManager;
//! use contact_book::config::ContactPaths;
//!
//! let paths = ContactPaths::new()?;
//! let manager = BackupManager::new(&paths, 10);
//! let (created, deleted) = manager.create_backup_with_retention()?;
//! ```

mod manager;

pub use manager::{BackupInfo, BackupManager};
