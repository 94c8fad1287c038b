//! Diff generation for audit logging
//!
//! Summarizes which contact fields changed between two versions of a contact.

use crate::models::{Contact, ContactField};

/// Longest value shown in a diff before truncation, in characters
const MAX_VALUE_LEN: usize = 50;

/// Describe the changed fields between two versions of a contact
///
/// Returns `None` when no selectable field differs. Timestamps are not
/// reported.
pub fn generate_diff(before: &Contact, after: &Contact) -> Option<String> {
    let changes: Vec<String> = ContactField::ALL
        .iter()
        .filter(|field| before.field(**field) != after.field(**field))
        .map(|field| {
            format!(
                "{}: {} -> {}",
                field,
                format_value(before.field(*field)),
                format_value(after.field(*field))
            )
        })
        .collect();

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

/// Quote a value, truncating long strings
fn format_value(value: &str) -> String {
    if value.chars().count() > MAX_VALUE_LEN {
        let head: String = value.chars().take(MAX_VALUE_LEN - 3).collect();
        format!("\"{}...\"", head)
    } else {
        format!("\"{}\"", value)
    }
}
