//! Display formatting for terminal output

pub mod contact;

pub use contact::{format_contact_details, format_contact_list};
