//! Interactive command-line front end
//!
//! A numbered menu over standard input and output that drives the
//! [`ContactBook`](crate::services::ContactBook) service.

pub mod menu;

pub use menu::{Menu, MenuChoice};
