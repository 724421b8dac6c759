//! Error types for Sysprober.
//!
//! Structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Recoverability hints for automation
//!
//! A failed parse never yields a partial snapshot: parse-level errors
//! propagate unmodified to whatever invoked `parse()`/`refresh()`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Sysprober operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Raw source acquisition errors (file read, path resolution).
    Probe,
    /// Structural validation errors (unit of measure).
    Validation,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Probe => write!(f, "probe"),
            ErrorCategory::Validation => write!(f, "validation"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for Sysprober.
#[derive(Error, Debug)]
pub enum Error {
    // Probe errors (10-19)
    #[error("source unavailable: {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Validation errors (20-29)
    #[error("unit of measure for entry '{entry}' is not kB (found '{found}')")]
    UnitMismatch { entry: String, found: String },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the stable error code, grouped by category:
    /// - 10-19: Probe errors
    /// - 20-29: Validation errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::SourceUnavailable { .. } => 10,
            Error::UnitMismatch { .. } => 20,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::SourceUnavailable { .. } => ErrorCategory::Probe,
            Error::UnitMismatch { .. } => ErrorCategory::Validation,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns whether this error is potentially recoverable.
    pub fn is_recoverable(&self) -> bool {
        match self {
            // The source file may appear (or become readable) later.
            Error::SourceUnavailable { .. } => true,
            // The kernel reports a unit this tool refuses to convert.
            Error::UnitMismatch { .. } => false,
            Error::Io(_) => true,
            Error::Json(_) => true,
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::SourceUnavailable { .. } => "Source Unavailable",
            Error::UnitMismatch { .. } => "Unit Mismatch",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Serialization Error",
        }
    }
}

/// Format an error for human-readable stderr output.
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, reset) = if use_color {
        ("\x1b[31m", "\x1b[0m")
    } else {
        ("", "")
    };

    format!(
        "{red}✗{reset} {headline} [code {code}]\n  Reason: {message}",
        red = red,
        reset = reset,
        headline = err.headline(),
        code = err.code(),
        message = err,
    )
}
