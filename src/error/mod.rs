//! Error types for printers and the shared writer registry.
//!
//! Only two places surface errors to callers:
//! - opening an output (`WriterRegistry::acquire`, printer builders)
//! - parsing configuration and date formats
//!
//! Writes after a handle is closed are dropped silently, and close-time I/O
//! errors are swallowed, so neither shows up here.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrinterError {
    /// The output file could not be opened for appending.
    #[error("cannot open '{}' for appending: {source}", .path.display())]
    Open {
        /// Absolute path that was requested
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An I/O error on an already open output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The timestamp pattern could not be translated.
    #[error("invalid date format '{pattern}': {reason}")]
    InvalidDateFormat { pattern: String, reason: String },

    /// The configuration could not be parsed.
    #[error("invalid printer configuration: {0}")]
    Config(String),

    /// A file printer was configured without a path.
    #[error("file printer configuration has no path")]
    MissingPath,
}

impl PrinterError {
    pub(crate) fn invalid_date_format(pattern: &str, reason: impl Into<String>) -> Self {
        PrinterError::InvalidDateFormat {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }

    /// The path involved in the error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            PrinterError::Open { path, .. } => Some(path),
            _ => None,
        }
    }
}

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
