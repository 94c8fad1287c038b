//! Append-only audit log
//!
//! Each entry is written as a single JSON line and flushed immediately.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::error::{ContactError, ContactResult};

use super::entry::AuditEntry;

/// Destination for audit entries
///
/// The contact book receives its sink at construction.
pub trait AuditSink {
    /// Record one entry
    fn record(&self, entry: &AuditEntry) -> ContactResult<()>;
}

/// Discards every entry
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAuditSink;

impl AuditSink for NullAuditSink {
    fn record(&self, _entry: &AuditEntry) -> ContactResult<()> {
        Ok(())
    }
}

/// Appends audit entries to a JSON-lines file
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Log to `log_path`; the file is created on the first entry
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }
}

impl AuditSink for AuditLogger {
    fn record(&self, entry: &AuditEntry) -> ContactResult<()> {
        let line = serde_json::to_string(entry)
            .map_err(|e| ContactError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| ContactError::Io(format!("Failed to open audit log: {}", e)))?;

        writeln!(file, "{}", line)
            .and_then(|_| file.flush())
            .map_err(|e| ContactError::Io(format!("Failed to write audit entry: {}", e)))
    }
}

#[cfg(test)]
impl AuditLogger {
    /// Parse every line of the log, oldest first
    pub(crate) fn read_all(&self) -> Vec<AuditEntry> {
        match std::fs::read_to_string(&self.log_path) {
            Ok(raw) => raw
                .lines()
                .map(|line| serde_json::from_str(line).unwrap())
                .collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => panic!("failed to read audit log: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::Operation;
    use crate::models::Contact;
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("contact_system.log");
        (AuditLogger::new(log_path), temp_dir)
    }

    #[test]
    fn test_record_and_read() {
        let (logger, _temp) = create_test_logger();

        logger
            .record(&AuditEntry::create(&Contact::new("Alice", "111")))
            .unwrap();

        let entries = logger.read_all();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].contact_name, "Alice");
    }

    #[test]
    fn test_one_line_per_entry() {
        let (logger, temp) = create_test_logger();

        for i in 0..3 {
            logger
                .record(&AuditEntry::create(&Contact::new(format!("Contact {}", i), "1")))
                .unwrap();
        }

        let raw = std::fs::read_to_string(temp.path().join("contact_system.log")).unwrap();
        assert_eq!(raw.lines().count(), 3);
    }

    #[test]
    fn test_missing_log_reads_empty() {
        let (logger, _temp) = create_test_logger();
        assert!(logger.read_all().is_empty());
    }

    #[test]
    fn test_appends_across_instances() {
        let (logger, temp) = create_test_logger();
        let sink: &dyn AuditSink = &logger;
        sink.record(&AuditEntry::delete(&Contact::new("Bob", "1"))).unwrap();

        let reopened = AuditLogger::new(temp.path().join("contact_system.log"));
        reopened
            .record(&AuditEntry::create(&Contact::new("Carol", "2")))
            .unwrap();

        let entries = reopened.read_all();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation, Operation::Delete);
    }

    #[test]
    fn test_unwritable_log_fails() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().to_path_buf());

        let result = logger.record(&AuditEntry::create(&Contact::new("A", "1")));
        assert!(matches!(result, Err(ContactError::Io(_))));
    }

    #[test]
    fn test_null_sink_accepts_entries() {
        let sink = NullAuditSink;
        assert!(sink.record(&AuditEntry::create(&Contact::new("A", "1"))).is_ok());
    }
}
