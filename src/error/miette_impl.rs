//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::PrinterError;

/// A diagnostic wrapper for printer errors compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct PrinterDiagnostic {
    /// The error message
    pub message: String,

    #[source]
    /// The underlying error source
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    #[help]
    /// Help text for the user
    pub help: Option<String>,

    #[diagnostic(severity)]
    /// Severity level
    pub severity: Severity,
}

impl From<PrinterError> for PrinterDiagnostic {
    fn from(e: PrinterError) -> Self {
        let help = match &e {
            PrinterError::Open { .. } => {
                Some("Check that the parent directory exists and is writable".to_string())
            }
            PrinterError::InvalidDateFormat { .. } => Some(
                "Use SimpleDateFormat letters (yyyy-MM-dd HH:mm:ss) or a strftime string".to_string(),
            ),
            PrinterError::MissingPath => Some("Set `path` in the printer configuration".to_string()),
            PrinterError::Io(_) | PrinterError::Config(_) => None,
        };

        PrinterDiagnostic {
            message: e.to_string(),
            source: Some(Box::new(e)),
            help,
            severity: Severity::Error,
        }
    }
}

impl From<PrinterError> for miette::Report {
    fn from(e: PrinterError) -> Self {
        miette::Report::new(PrinterDiagnostic::from(e))
    }
}
