//! Printer that writes to the terminal.

use std::fmt;
use std::io;
use std::sync::Arc;

use super::{DateFormat, Printer, PrinterSettings, describe};
use crate::config::PrinterConfig;
use crate::error::PrinterError;
use crate::io::{OutputTarget, StderrOutput, StdoutOutput};
use crate::writer::WriterHandle;

/// Printer that writes plain (uncolored) text to stdout, and error output
/// to stderr. Each call is flushed immediately.
pub struct TerminalPrinter {
    settings: PrinterSettings,
    out: WriterHandle,
    err: WriterHandle,
}

impl TerminalPrinter {
    pub fn builder(level: i32, timestamping: bool) -> TerminalPrinterBuilder {
        TerminalPrinterBuilder::new(level, timestamping)
    }

    /// Build a stdout/stderr printer from a configuration; `path` is ignored.
    pub fn from_config(config: &PrinterConfig) -> Result<Self, PrinterError> {
        let mut builder = Self::builder(config.level, config.timestamp);
        if let Some(date_format) = config.parsed_date_format()? {
            builder = builder.with_format(date_format);
        }
        builder.build()
    }

    fn send(handle: &WriterHandle, text: &str) {
        if let Err(e) = handle.write_and_flush(text) {
            tracing::warn!(
                stream = %handle.path().display(),
                error = %e,
                "dropping printer output"
            );
        }
    }
}

impl Printer for TerminalPrinter {
    fn settings(&self) -> &PrinterSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut PrinterSettings {
        &mut self.settings
    }

    fn emit(&self, text: &str) {
        Self::send(&self.out, text);
    }

    fn emit_error(&self, text: &str) {
        Self::send(&self.err, text);
    }
}

impl fmt::Display for TerminalPrinter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(f, "TerminalPrinter", &self.settings)
    }
}

impl fmt::Debug for TerminalPrinter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminalPrinter")
            .field("settings", &self.settings)
            .field("out", &self.out.path())
            .field("err", &self.err.path())
            .finish()
    }
}

/// Builder for `TerminalPrinter`.
pub struct TerminalPrinterBuilder {
    settings: PrinterSettings,
    out: Arc<dyn OutputTarget>,
    err: Arc<dyn OutputTarget>,
}

impl TerminalPrinterBuilder {
    pub fn new(level: i32, timestamping: bool) -> Self {
        Self {
            settings: PrinterSettings::new(level, timestamping),
            out: Arc::new(StdoutOutput::new()),
            err: Arc::new(StderrOutput::new()),
        }
    }

    /// Set the timestamp format (default `yyyy-MM-dd HH:mm:ss`).
    pub fn with_format(mut self, date_format: DateFormat) -> Self {
        self.settings.date_format = date_format;
        self
    }

    /// Replace stdout/stderr with other targets.
    pub fn with_streams(mut self, out: Arc<dyn OutputTarget>, err: Arc<dyn OutputTarget>) -> Self {
        self.out = out;
        self.err = err;
        self
    }

    pub fn build(self) -> Result<TerminalPrinter, PrinterError> {
        Ok(TerminalPrinter {
            settings: self.settings,
            out: open(self.out.as_ref())?,
            err: open(self.err.as_ref())?,
        })
    }
}

fn open(target: &dyn OutputTarget) -> Result<WriterHandle, PrinterError> {
    WriterHandle::from_target(target.id(), target).map_err(|source: io::Error| PrinterError::Open {
        path: target.id().into(),
        source,
    })
}
