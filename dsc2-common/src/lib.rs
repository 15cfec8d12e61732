//! # DS-C2 Common Library
//!
//! Shared code for the DS-C2 dashboard modules including:
//! - Loosely-typed table model for the two log sources
//! - Event severity classification
//! - Configuration loading and data folder resolution
//! - Timestamp and export-name formatting

pub mod config;
pub mod error;
pub mod severity;
pub mod table;
pub mod time;

pub use error::{Error, Result};
pub use severity::Severity;
pub use table::Table;
