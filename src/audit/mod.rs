//! Audit logging for the contact book
//!
//! Records every add, update and delete with the contact's before/after
//! values in an append-only log.
//!
//! # Architecture
//!
//! - `AuditEntry`: a single event with timestamp, operation, contact name and
//!   optional before/after values.
//! - `AuditSink`: where entries go. The contact book is handed one when it is
//!   opened.
//! - `AuditLogger`: the file-backed sink, one JSON object per line (JSONL).
//! - `generate_diff`: summarizes which contact fields changed.
//!
//! # Example
//!
//! ```rust,ignore
//! use contact_book::audit::{AuditEntry, AuditLogger, AuditSink};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.record(&AuditEntry::create(&contact))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, Operation};
pub use logger::{AuditLogger, AuditSink, NullAuditSink};
