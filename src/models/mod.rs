//! Core data models for the contact book

pub mod contact;

pub use contact::{Contact, ContactField, ContactValidationError, DEFAULT_CATEGORY};
