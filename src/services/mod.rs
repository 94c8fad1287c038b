//! Business logic layer
//!
//! Validation, persistence and audit logging for contact operations.

pub mod contact_book;

pub use contact_book::ContactBook;
