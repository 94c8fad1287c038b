//! Contact book service
//!
//! Holds the in-memory contact list and implements add, search, update,
//! delete and list over it. Every mutation rewrites the whole encrypted
//! store and is reported to the audit sink.

use std::path::PathBuf;

use crate::audit::{AuditEntry, AuditSink};
use crate::error::{ContactError, ContactResult};
use crate::models::{Contact, ContactField, DEFAULT_CATEGORY};
use crate::storage::EncryptedStore;

/// The in-memory contact directory backed by an encrypted store file
pub struct ContactBook {
    store: EncryptedStore,
    path: PathBuf,
    contacts: Vec<Contact>,
    audit: Box<dyn AuditSink>,
    /// Why the store file could not be read when the book was opened
    load_error: Option<ContactError>,
    /// Most recent audit failure, kept for the caller to report
    audit_error: Option<ContactError>,
}

impl ContactBook {
    /// Open the contact book stored at `path`
    ///
    /// A missing store file gives an empty book. A store file that cannot be
    /// decrypted or parsed also gives an empty book; the reason is kept in
    /// [`ContactBook::load_error`] and the file is overwritten by the next
    /// mutation.
    pub fn open(
        store: EncryptedStore,
        path: impl Into<PathBuf>,
        audit: Box<dyn AuditSink>,
    ) -> ContactResult<Self> {
        let path = path.into();
        let (contacts, load_error) = match store.try_load(&path) {
            Ok(contacts) => (contacts, None),
            Err(e) if e.is_recoverable_load_error() => (Vec::new(), Some(e)),
            Err(e) => return Err(e),
        };

        Ok(Self {
            store,
            path,
            contacts,
            audit,
            load_error,
            audit_error: None,
        })
    }

    /// Add a contact at the end of the list and persist
    ///
    /// Duplicate names are allowed.
    pub fn add(&mut self, mut contact: Contact) -> ContactResult<()> {
        contact
            .validate()
            .map_err(|e| ContactError::Validation(e.to_string()))?;
        if contact.category.trim().is_empty() {
            contact.category = DEFAULT_CATEGORY.to_string();
        }

        self.contacts.push(contact);
        if let Err(e) = self.persist() {
            self.contacts.pop();
            return Err(e);
        }

        let entry = AuditEntry::create(&self.contacts[self.contacts.len() - 1]);
        self.record(entry);
        Ok(())
    }

    /// Contacts whose `field` contains `needle`, ignoring case, in list order
    pub fn search(&self, field: ContactField, needle: &str) -> Vec<&Contact> {
        self.contacts
            .iter()
            .filter(|contact| contact.field_contains(field, needle))
            .collect()
    }

    /// Like [`ContactBook::search`], with the field given by name
    ///
    /// # Errors
    ///
    /// Returns `InvalidField` if `field` does not name a contact field.
    pub fn search_by_field_name(&self, field: &str, needle: &str) -> ContactResult<Vec<&Contact>> {
        let field: ContactField = field.parse()?;
        Ok(self.search(field, needle))
    }

    /// Set `field` on the first contact named `name` (case-insensitive)
    ///
    /// Returns `false` without changing anything if no contact has that name.
    pub fn update(
        &mut self,
        name: &str,
        field: ContactField,
        value: impl Into<String>,
    ) -> ContactResult<bool> {
        let value = value.into();
        if field == ContactField::Name && value.trim().is_empty() {
            return Err(ContactError::Validation("Contact name cannot be empty".into()));
        }

        let Some(index) = self.position(name) else {
            return Ok(false);
        };

        let before = self.contacts[index].clone();
        self.contacts[index].set_field(field, value);
        if let Err(e) = self.contacts[index]
            .validate()
            .map_err(|e| ContactError::Validation(e.to_string()))
            .and_then(|_| self.persist())
        {
            self.contacts[index] = before;
            return Err(e);
        }

        let entry = AuditEntry::update(&before, &self.contacts[index]);
        self.record(entry);
        Ok(true)
    }

    /// Remove the first contact named `name` (case-insensitive)
    ///
    /// Returns `false` if no contact has that name.
    pub fn delete(&mut self, name: &str) -> ContactResult<bool> {
        let Some(index) = self.position(name) else {
            return Ok(false);
        };

        let removed = self.contacts.remove(index);
        if let Err(e) = self.persist() {
            self.contacts.insert(index, removed);
            return Err(e);
        }

        self.record(AuditEntry::delete(&removed));
        Ok(true)
    }

    /// All contacts in insertion order
    pub fn list_all(&self) -> &[Contact] {
        &self.contacts
    }

    /// First contact named `name` (case-insensitive)
    pub fn find(&self, name: &str) -> Option<&Contact> {
        self.position(name).map(|index| &self.contacts[index])
    }

    /// Number of contacts
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Check if the book has no contacts
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Why the store file was discarded on open, if it was
    pub fn load_error(&self) -> Option<&ContactError> {
        self.load_error.as_ref()
    }

    /// Take the most recent audit failure, if any
    pub fn take_audit_error(&mut self) -> Option<ContactError> {
        self.audit_error.take()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.contacts.iter().position(|c| c.matches_name(name))
    }

    fn persist(&self) -> ContactResult<()> {
        self.store.save(&self.contacts, &self.path)
    }

    // The audit log is observability only; its failures never undo a change
    fn record(&mut self, entry: AuditEntry) {
        if let Err(e) = self.audit.record(&entry) {
            self.audit_error = Some(e);
        }
    }
}
