//! Backup manager for the contact book
//!
//! Keeps rolling copies of the encrypted store file. Backups are byte-for-byte
//! copies, so they stay encrypted and need the same key file to be read.

use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};

use crate::config::paths::ContactPaths;
use crate::error::{ContactError, ContactResult};

const BACKUP_PREFIX: &str = "contacts-";
const BACKUP_EXTENSION: &str = "encrypted";

/// Metadata about a backup
#[derive(Debug, Clone)]
pub struct BackupInfo {
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    /// When the backup was created
    pub created_at: DateTime<Utc>,
    /// Orders backups taken within the same millisecond
    pub sequence: u32,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Manages backup creation and retention
pub struct BackupManager {
    backup_dir: PathBuf,
    store_file: PathBuf,
    /// Number of backups to keep
    retention: u32,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(paths: &ContactPaths, retention: u32) -> Self {
        Self {
            backup_dir: paths.backup_dir(),
            store_file: paths.store_file(),
            retention,
        }
    }

    /// Copy the current store file into the backup directory
    ///
    /// Returns `None` when there is no store file yet.
    pub fn create_backup(&self) -> ContactResult<Option<PathBuf>> {
        if !self.store_file.exists() {
            return Ok(None);
        }

        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            ContactError::Io(format!("Failed to create backup directory: {}", e))
        })?;

        let now = Utc::now();
        let stamp = format!(
            "{}-{:03}",
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis()
        );

        self.copy_store_as(&stamp).map(Some)
    }

    /// Copy the store to a new file named after `stamp`
    ///
    /// An existing backup is never overwritten; a `-N` suffix is added
    /// until the name is free.
    fn copy_store_as(&self, stamp: &str) -> ContactResult<PathBuf> {
        let mut sequence = 0u32;
        loop {
            let filename = if sequence == 0 {
                format!("{}{}.{}", BACKUP_PREFIX, stamp, BACKUP_EXTENSION)
            } else {
                format!("{}{}-{}.{}", BACKUP_PREFIX, stamp, sequence, BACKUP_EXTENSION)
            };
            let backup_path = self.backup_dir.join(filename);

            let mut target = match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&backup_path)
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    sequence += 1;
                    continue;
                }
                Err(e) => {
                    return Err(ContactError::Io(format!(
                        "Failed to create backup file: {}",
                        e
                    )))
                }
            };

            let copied = File::open(&self.store_file)
                .and_then(|mut source| io::copy(&mut source, &mut target))
                .and_then(|_| target.sync_all());
            if let Err(e) = copied {
                let _ = fs::remove_file(&backup_path);
                return Err(ContactError::Io(format!(
                    "Failed to write backup file: {}",
                    e
                )));
            }

            return Ok(backup_path);
        }
    }

    /// List all available backups, newest first
    pub fn list_backups(&self) -> ContactResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir).map_err(|e| {
            ContactError::Io(format!("Failed to read backup directory: {}", e))
        })? {
            let entry = entry.map_err(|e| {
                ContactError::Io(format!("Failed to read directory entry: {}", e))
            })?;

            if let Some(info) = parse_backup_info(&entry.path()) {
                backups.push(info);
            }
        }

        backups.sort_by(|a, b| {
            (b.created_at, b.sequence).cmp(&(a.created_at, a.sequence))
        });

        Ok(backups)
    }

    /// Delete the oldest backups beyond the retention count
    pub fn enforce_retention(&self) -> ContactResult<Vec<PathBuf>> {
        let mut deleted = Vec::new();

        for backup in self
            .list_backups()?
            .into_iter()
            .skip(self.retention as usize)
        {
            fs::remove_file(&backup.path)
                .map_err(|e| ContactError::Io(format!("Failed to delete old backup: {}", e)))?;
            deleted.push(backup.path);
        }

        Ok(deleted)
    }

    /// Create a backup and then enforce retention policy
    pub fn create_backup_with_retention(&self) -> ContactResult<(Option<PathBuf>, Vec<PathBuf>)> {
        let backup_path = self.create_backup()?;
        let deleted = self.enforce_retention()?;
        Ok((backup_path, deleted))
    }
}

fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    if path.extension()? != BACKUP_EXTENSION {
        return None;
    }

    let filename = path.file_name()?.to_string_lossy().to_string();
    let stamp = filename
        .strip_prefix(BACKUP_PREFIX)?
        .strip_suffix(BACKUP_EXTENSION)?
        .strip_suffix('.')?;
    let (created_at, sequence) = parse_backup_stamp(stamp)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        sequence,
        size_bytes,
    })
}

/// Parse `YYYYMMDD-HHMMSS-mmm[-N]` from a backup filename
fn parse_backup_stamp(stamp: &str) -> Option<(DateTime<Utc>, u32)> {
    let mut parts = stamp.split('-');
    let date_part = parts.next()?;
    let time_part = parts.next()?;
    let millis: u32 = parts.next()?.parse().ok()?;
    let sequence: u32 = match parts.next() {
        Some(n) => n.parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() || date_part.len() != 8 || time_part.len() != 6 {
        return None;
    }

    let date = NaiveDate::parse_from_str(date_part, "%Y%m%d").ok()?;
    let time = NaiveTime::parse_from_str(time_part, "%H%M%S").ok()?;
    let time = time.with_nanosecond(millis.checked_mul(1_000_000)?)?;

    let created_at = DateTime::from_naive_utc_and_offset(NaiveDateTime::new(date, time), Utc);
    Some((created_at, sequence))
}
