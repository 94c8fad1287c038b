//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::ContactError;

/// Read a whole file, returning `None` if it doesn't exist
pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Option<Vec<u8>>, ContactError> {
    let path = path.as_ref();

    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ContactError::Storage(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Write bytes to a file atomically (write to temp, then rename)
///
/// This ensures that the file is either completely written or not modified at all,
/// preventing corruption on crashes or power failures.
pub fn write_bytes_atomic<P: AsRef<Path>>(path: P, data: &[u8]) -> Result<(), ContactError> {
    write_via_temp(path.as_ref(), |writer| writer.write_all(data))
}

/// Fill a temp file next to `path` with `fill`, sync it, then rename it over
/// `path`. The temp file is removed if any step fails.
fn write_via_temp<F>(path: &Path, fill: F) -> Result<(), ContactError>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ContactError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = temp_path_for(path);

    let file = File::create(&temp_path)
        .map_err(|e| ContactError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    let written = fill(&mut writer)
        .and_then(|_| writer.flush())
        .and_then(|_| writer.get_ref().sync_all());
    drop(writer);

    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(ContactError::Storage(format!(
            "Failed to write temp file: {}",
            e
        )));
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ContactError::Storage(format!("Failed to rename temp file: {}", e))
    })
}

/// `contacts.encrypted` -> `contacts.encrypted.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_nonexistent_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.bin");

        assert!(read_bytes(&path).unwrap().is_none());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.bin");

        write_bytes_atomic(&path, b"payload").unwrap();
        assert_eq!(read_bytes(&path).unwrap().unwrap(), b"payload");
    }

    #[test]
    fn test_overwrite_replaces_contents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.bin");

        write_bytes_atomic(&path, b"a much longer first payload").unwrap();
        write_bytes_atomic(&path, b"short").unwrap();

        assert_eq!(read_bytes(&path).unwrap().unwrap(), b"short");
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("contacts.encrypted");

        write_bytes_atomic(&path, b"payload").unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("contacts.encrypted.tmp").exists());
    }

    #[test]
    fn test_failed_write_removes_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("contacts.encrypted");
        write_bytes_atomic(&path, b"old").unwrap();

        let result = write_via_temp(&path, |writer| {
            writer.write_all(b"partial")?;
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        });

        assert!(matches!(result, Err(ContactError::Storage(_))));
        assert!(!temp_dir.path().join("contacts.encrypted.tmp").exists());
        assert_eq!(read_bytes(&path).unwrap().unwrap(), b"old");
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("occupied");
        fs::create_dir_all(path.join("child")).unwrap();

        assert!(write_bytes_atomic(&path, b"payload").is_err());
        assert!(!temp_dir.path().join("occupied.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("test.bin");

        write_bytes_atomic(&path, b"payload").unwrap();
        assert!(path.exists());
    }
}
