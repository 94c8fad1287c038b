use std::io;

use anyhow::{Context, Result};

use contact_book::audit::AuditLogger;
use contact_book::backup::BackupManager;
use contact_book::cli::Menu;
use contact_book::config::{ContactPaths, Settings};
use contact_book::crypto::KeyStore;
use contact_book::services::ContactBook;
use contact_book::storage::EncryptedStore;

fn main() -> Result<()> {
    // Initialize paths and settings
    let paths = ContactPaths::new()?;
    let settings = Settings::load(&paths)?;
    let paths = paths.with_settings(&settings);
    paths.ensure_directories()?;

    // Back up the store before anything can overwrite it
    if settings.backup_on_start {
        BackupManager::new(&paths, settings.backup_retention)
            .create_backup_with_retention()
            .context("Failed to back up contact store")?;
    }

    let keys = KeyStore::new(paths.key_file());
    let store = EncryptedStore::from_key_store(&keys)?;

    let logger = AuditLogger::new(paths.audit_log());
    let mut book = ContactBook::open(store, paths.store_file(), Box::new(logger))?;

    if let Some(e) = book.load_error() {
        println!(
            "Warning: could not read {} ({}). Starting with an empty contact book.",
            paths.store_file().display(),
            e
        );
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(stdin.lock(), stdout.lock()).run(&mut book)?;

    Ok(())
}
