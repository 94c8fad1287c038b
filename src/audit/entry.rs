//! Audit entry data structures
//!
//! Defines the structure of audit log entries: what happened, to which
//! contact, and the contact's state before and after.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Contact;

use super::diff::generate_diff;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Contact was added
    Create,
    /// Contact was updated
    Update,
    /// Contact was deleted
    Delete,
}

/// A single audit log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Name of the affected contact
    pub contact_name: String,

    /// The contact before the operation (updates and deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Contact>,

    /// The contact after the operation (creates and updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Contact>,

    /// Human-readable diff summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    /// Entry for an added contact
    pub fn create(contact: &Contact) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            contact_name: contact.name.clone(),
            before: None,
            after: Some(contact.clone()),
            diff_summary: None,
        }
    }

    /// Entry for an updated contact, with a summary of changed fields
    pub fn update(before: &Contact, after: &Contact) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Update,
            contact_name: after.name.clone(),
            before: Some(before.clone()),
            after: Some(after.clone()),
            diff_summary: generate_diff(before, after),
        }
    }

    /// Entry for a deleted contact
    pub fn delete(contact: &Contact) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            contact_name: contact.name.clone(),
            before: Some(contact.clone()),
            after: None,
            diff_summary: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContactField;

    #[test]
    fn test_create_entry() {
        let contact = Contact::new("Alice", "111");
        let entry = AuditEntry::create(&contact);

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.contact_name, "Alice");
        assert!(entry.before.is_none());
        assert_eq!(entry.after, Some(contact));
    }

    #[test]
    fn test_update_entry() {
        let before = Contact::new("Alice", "111");
        let mut after = before.clone();
        after.set_field(ContactField::Phone, "222");

        let entry = AuditEntry::update(&before, &after);

        assert_eq!(entry.operation, Operation::Update);
        assert!(entry.before.is_some());
        assert!(entry.after.is_some());
        assert_eq!(
            entry.diff_summary,
            Some("phone: \"111\" -> \"222\"".to_string())
        );
    }

    #[test]
    fn test_delete_entry() {
        let entry = AuditEntry::delete(&Contact::new("Old Friend", "1"));

        assert_eq!(entry.operation, Operation::Delete);
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::create(&Contact::new("Alice", "111"));

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"operation\":\"create\""));
        assert!(!json.contains("\"before\""));

        let deserialized: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, entry);
    }
}
