//! Contact display formatting
//!
//! Formats contacts for terminal output as detail cards.

use crate::models::Contact;

/// Separator printed after each contact card
const SEPARATOR_WIDTH: usize = 40;

/// Format a single contact's details
pub fn format_contact_details(contact: &Contact) -> String {
    let mut output = String::new();

    output.push_str(&format!("Name: {}\n", contact.name));
    output.push_str(&format!("Phone: {}\n", contact.phone));
    output.push_str(&format!("Email: {}\n", contact.email));
    output.push_str(&format!("Address: {}\n", contact.address));
    output.push_str(&format!("Category: {}\n", contact.category));
    output.push_str(&format!(
        "Created: {}\n",
        contact.created_at.format("%Y-%m-%d %H:%M")
    ));
    output.push_str(&format!(
        "Last Updated: {}\n",
        contact.updated_at.format("%Y-%m-%d %H:%M")
    ));

    output
}

/// Format contacts as a sequence of cards separated by rules
///
/// `empty_message` is returned unchanged when there is nothing to show.
pub fn format_contact_list<'a, I>(contacts: I, empty_message: &str) -> String
where
    I: IntoIterator<Item = &'a Contact>,
{
    let mut output = String::new();

    for contact in contacts {
        output.push_str(&format_contact_details(contact));
        output.push_str(&"-".repeat(SEPARATOR_WIDTH));
        output.push('\n');
    }

    if output.is_empty() {
        format!("{}\n", empty_message)
    } else {
        output
    }
}
