//! Configuration module for the contact book
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::{ContactPaths, DATA_DIR_ENV};
pub use settings::Settings;
