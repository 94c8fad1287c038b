//! Contact model
//!
//! A single address book entry plus the enumerated selector used to read and
//! write its text fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ContactError;

/// Category assigned when none is given
pub const DEFAULT_CATEGORY: &str = "General";

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// One stored contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Display name, used for lookups (case-insensitive)
    pub name: String,

    /// Phone number, free-form
    #[serde(default)]
    pub phone: String,

    /// Email address (may be empty)
    #[serde(default)]
    pub email: String,

    /// Postal address (may be empty)
    #[serde(default)]
    pub address: String,

    /// Grouping label such as "Family" or "Work"
    #[serde(default = "default_category")]
    pub category: String,

    /// When the contact was created
    pub created_at: DateTime<Utc>,

    /// When the contact was last modified
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Create a new contact in the default category
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            phone: phone.into(),
            email: String::new(),
            address: String::new(),
            category: default_category(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the email address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Set the postal address
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Set the category; a blank category falls back to the default
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = if category.trim().is_empty() {
            default_category()
        } else {
            category
        };
        self
    }

    /// Read a field by selector
    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Phone => &self.phone,
            ContactField::Email => &self.email,
            ContactField::Address => &self.address,
            ContactField::Category => &self.category,
        }
    }

    /// Overwrite a field by selector and refresh `updated_at`
    pub fn set_field(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Name => self.name = value,
            ContactField::Phone => self.phone = value,
            ContactField::Email => self.email = value,
            ContactField::Address => self.address = value,
            ContactField::Category => self.category = value,
        }
        self.touch();
    }

    /// Refresh the modification time, never moving it before `created_at`
    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }

    /// Check if this contact has the given name (case-insensitive, exact)
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Check if the selected field contains `needle` (case-insensitive)
    pub fn field_contains(&self, field: ContactField, needle: &str) -> bool {
        self.field(field)
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }

    /// Validate the contact
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.name.trim().is_empty() {
            return Err(ContactValidationError::EmptyName);
        }

        if self.updated_at < self.created_at {
            return Err(ContactValidationError::UpdatedBeforeCreated);
        }

        Ok(())
    }
}

/// Validation errors for contacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    EmptyName,
    UpdatedBeforeCreated,
}

impl fmt::Display for ContactValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Contact name cannot be empty"),
            Self::UpdatedBeforeCreated => {
                write!(f, "Contact was updated before it was created")
            }
        }
    }
}

impl std::error::Error for ContactValidationError {}

/// The text fields of a contact that can be searched and updated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Phone,
    Email,
    Address,
    Category,
}

impl ContactField {
    /// Every selectable field, in display order
    pub const ALL: [ContactField; 5] = [
        ContactField::Name,
        ContactField::Phone,
        ContactField::Email,
        ContactField::Address,
        ContactField::Category,
    ];

    /// Lowercase name as accepted by `FromStr`
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Phone => "phone",
            ContactField::Email => "email",
            ContactField::Address => "address",
            ContactField::Category => "category",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContactField {
    type Err = ContactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == wanted)
            .ok_or_else(|| ContactError::InvalidField(s.to_string()))
    }
}
