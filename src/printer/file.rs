//! Printer that appends to a file through a shared writer.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{DateFormat, Printer, PrinterSettings, describe};
use crate::config::PrinterConfig;
use crate::error::PrinterError;
use crate::writer::{WriterHandle, WriterRegistry, global_registry};

/// Printer that appends to a file.
///
/// Printers built for the same path, from any thread, share one
/// `WriterHandle` obtained from their registry, so their lines are
/// serialized into the file instead of interleaving. Each printer keeps its
/// registry alive; the handle closes on `shutdown` or once the last printer
/// and the registry are gone.
///
/// # Example
///
/// ```rust,ignore
/// use jcdp::{FilePrinter, Printer};
///
/// let printer = FilePrinter::builder("app.log", 2, true).build()?;
/// printer.println("started");
/// printer.debug_println_at("cache warmed", 2);
/// printer.flush()?;
/// ```
pub struct FilePrinter {
    settings: PrinterSettings,
    writer: Arc<WriterHandle>,
    registry: Arc<WriterRegistry>,
}

impl FilePrinter {
    /// Start building a printer for `path` with the given maximum debug
    /// level and timestamp flag.
    pub fn builder(path: impl Into<PathBuf>, level: i32, timestamping: bool) -> FilePrinterBuilder {
        FilePrinterBuilder::new(path, level, timestamping)
    }

    /// Build a printer from a parsed configuration.
    pub fn from_config(
        config: &PrinterConfig,
        registry: Arc<WriterRegistry>,
    ) -> Result<Self, PrinterError> {
        let path = config.path.as_ref().ok_or(PrinterError::MissingPath)?;
        let mut builder = Self::builder(path, config.level, config.timestamp).with_registry(registry);
        if let Some(date_format) = config.parsed_date_format()? {
            builder = builder.with_format(date_format);
        }
        builder.build()
    }

    /// Absolute path of the file this printer appends to.
    pub fn path(&self) -> &Path {
        self.writer.path()
    }

    /// The shared handle behind this printer.
    pub fn writer(&self) -> &Arc<WriterHandle> {
        &self.writer
    }

    /// The registry the writer was acquired from.
    pub fn registry(&self) -> &Arc<WriterRegistry> {
        &self.registry
    }

    /// Force buffered output to disk.
    pub fn flush(&self) -> Result<(), PrinterError> {
        self.writer.flush()?;
        Ok(())
    }
}

impl Printer for FilePrinter {
    fn settings(&self) -> &PrinterSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut PrinterSettings {
        &mut self.settings
    }

    fn emit(&self, text: &str) {
        if let Err(e) = self.writer.write(text) {
            tracing::warn!(path = %self.path().display(), error = %e, "dropping printer output");
        }
    }
}

impl fmt::Display for FilePrinter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(f, "FilePrinter", &self.settings)?;
        write!(f, " | {}", self.path().display())
    }
}

impl fmt::Debug for FilePrinter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePrinter")
            .field("settings", &self.settings)
            .field("path", &self.path())
            .finish()
    }
}

/// Builder for `FilePrinter`.
pub struct FilePrinterBuilder {
    path: PathBuf,
    settings: PrinterSettings,
    registry: Option<Arc<WriterRegistry>>,
}

impl FilePrinterBuilder {
    pub fn new(path: impl Into<PathBuf>, level: i32, timestamping: bool) -> Self {
        Self {
            path: path.into(),
            settings: PrinterSettings::new(level, timestamping),
            registry: None,
        }
    }

    /// Set the timestamp format (default `yyyy-MM-dd HH:mm:ss`).
    pub fn with_format(mut self, date_format: DateFormat) -> Self {
        self.settings.date_format = date_format;
        self
    }

    /// Use `registry` instead of the process-wide one.
    pub fn with_registry(mut self, registry: Arc<WriterRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Acquire the shared writer for the path and build the printer.
    pub fn build(self) -> Result<FilePrinter, PrinterError> {
        let registry = self.registry.unwrap_or_else(global_registry);
        let writer = registry.acquire(&self.path)?;
        Ok(FilePrinter {
            settings: self.settings,
            writer,
            registry,
        })
    }
}
