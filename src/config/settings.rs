//! User settings for the contact book
//!
//! Stores file names and backup preferences in an optional JSON file in the
//! data directory. Missing fields fall back to their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::paths::ContactPaths;
use crate::error::ContactError;

/// User settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Key file name, relative to the data directory
    #[serde(default = "default_key_file")]
    pub key_file: String,

    /// Encrypted store file name, relative to the data directory
    #[serde(default = "default_store_file")]
    pub store_file: String,

    /// Audit log file name, relative to the data directory
    #[serde(default = "default_audit_log_file")]
    pub audit_log_file: String,

    /// Snapshot the store into `backups/` when the program starts
    #[serde(default = "default_backup_on_start")]
    pub backup_on_start: bool,

    /// Number of backups to keep
    #[serde(default = "default_backup_retention")]
    pub backup_retention: u32,
}

fn default_key_file() -> String {
    "encryption.key".to_string()
}

fn default_store_file() -> String {
    "contacts.encrypted".to_string()
}

fn default_audit_log_file() -> String {
    "contact_system.log".to_string()
}

fn default_backup_on_start() -> bool {
    true
}

fn default_backup_retention() -> u32 {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_file: default_key_file(),
            store_file: default_store_file(),
            audit_log_file: default_audit_log_file(),
            backup_on_start: default_backup_on_start(),
            backup_retention: default_backup_retention(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    ///
    /// The settings file is never written by the program.
    pub fn load(paths: &ContactPaths) -> Result<Self, ContactError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| ContactError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| ContactError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ContactError> {
        let files = [
            ("key_file", &self.key_file),
            ("store_file", &self.store_file),
            ("audit_log_file", &self.audit_log_file),
        ];

        for (label, name) in &files {
            if name.trim().is_empty() {
                return Err(ContactError::Config(format!("{} cannot be empty", label)));
            }
        }

        // Any shared file would be overwritten by another writer
        for (i, (label, name)) in files.iter().enumerate() {
            for (other_label, other) in &files[i + 1..] {
                if Path::new(name.trim()) == Path::new(other.trim()) {
                    return Err(ContactError::Config(format!(
                        "{} and {} must be different files",
                        label, other_label
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.key_file, "encryption.key");
        assert_eq!(settings.store_file, "contacts.encrypted");
        assert!(settings.backup_on_start);
        assert_eq!(settings.backup_retention, 10);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ContactPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load(&paths).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ContactPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            backup_on_start: false,
            backup_retention: 3,
            ..Settings::default()
        };
        std::fs::write(
            paths.settings_file(),
            serde_json::to_string_pretty(&settings).unwrap(),
        )
        .unwrap();

        let loaded = Settings::load(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ContactPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"store_file": "people.bin"}"#).unwrap();

        let loaded = Settings::load(&paths).unwrap();
        assert_eq!(loaded.store_file, "people.bin");
        assert_eq!(loaded.key_file, "encryption.key");
        assert_eq!(loaded.backup_retention, 10);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ContactPaths::with_base_dir(temp_dir.path().to_path_buf());

        std::fs::write(paths.settings_file(), "not json").unwrap();
        assert!(matches!(
            Settings::load(&paths),
            Err(ContactError::Config(_))
        ));

        std::fs::write(paths.settings_file(), r#"{"audit_log_file": " "}"#).unwrap();
        assert!(matches!(
            Settings::load(&paths),
            Err(ContactError::Config(_))
        ));
    }

    fn assert_rejected(paths: &ContactPaths, json: &str, pair: &str) {
        std::fs::write(paths.settings_file(), json).unwrap();
        match Settings::load(paths) {
            Err(ContactError::Config(msg)) => assert!(msg.contains(pair), "{}", msg),
            other => panic!("{} accepted: {:?}", json, other),
        }
    }

    #[test]
    fn test_shared_file_names_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ContactPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_rejected(
            &paths,
            r#"{"key_file": "same", "store_file": "same"}"#,
            "key_file and store_file",
        );
        assert_rejected(
            &paths,
            r#"{"audit_log_file": "encryption.key"}"#,
            "key_file and audit_log_file",
        );
        assert_rejected(
            &paths,
            r#"{"audit_log_file": "contacts.encrypted"}"#,
            "store_file and audit_log_file",
        );
        assert_rejected(
            &paths,
            r#"{"store_file": "data/contacts", "audit_log_file": "data/contacts/"}"#,
            "store_file and audit_log_file",
        );
    }
}
