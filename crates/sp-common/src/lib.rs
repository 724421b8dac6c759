//! Sysprober common types and errors.
//!
//! This crate provides the foundational types shared across sp-core modules:
//! - The probe error taxonomy with stable codes
//! - Output format specifications for the CLI

pub mod error;
pub mod output;

pub use error::{Error, ErrorCategory, Result};
pub use output::OutputFormat;
