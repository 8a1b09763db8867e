//! Leveled, optionally timestamped printers.
//!
//! This module provides:
//! - `Printer`: the shared printing behavior (levels, timestamps, debug gating)
//! - `PrinterSettings`: level, timestamp flag and date format of one printer
//! - `FilePrinter`: appends to a file through a shared `WriterHandle`
//! - `TerminalPrinter`: writes to stdout/stderr
//! - `DateFormat`: timestamp patterns
//!
//! Every call composes its whole text first (timestamp, level tag, message,
//! line separator) and hands it to the writer as one unit, so concurrent
//! printers sharing a file never split each other's lines.

mod date;
mod file;
mod terminal;

use std::fmt::{self, Display, Write as _};

pub use date::DateFormat;
pub use file::{FilePrinter, FilePrinterBuilder};
pub use terminal::{TerminalPrinter, TerminalPrinterBuilder};

/// Platform line separator appended by the `*println` variants.
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
/// Platform line separator appended by the `*println` variants.
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Configuration shared by all printer kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterSettings {
    /// Maximum debug level this printer prints; `0` disables debug output.
    pub level: i32,
    /// Prefix every message with a timestamp.
    pub timestamping: bool,
    /// Format of the timestamp prefix.
    pub date_format: DateFormat,
}

impl PrinterSettings {
    pub fn new(level: i32, timestamping: bool) -> Self {
        Self {
            level,
            timestamping,
            date_format: DateFormat::default(),
        }
    }

    pub fn with_date_format(mut self, date_format: DateFormat) -> Self {
        self.date_format = date_format;
        self
    }

    /// Build `[<ts> ][[ <level> ] ]<msg>[<sep>]`.
    pub(crate) fn compose(&self, msg: &dyn Display, level: Option<i32>, newline: bool) -> String {
        let mut text = String::new();
        if self.timestamping {
            text.push_str(&self.date_format.now());
            text.push(' ');
        }
        if let Some(level) = level {
            let _ = write!(text, "[ {level} ] ");
        }
        let _ = write!(text, "{msg}");
        if newline {
            text.push_str(LINE_SEPARATOR);
        }
        text
    }
}

impl Default for PrinterSettings {
    fn default() -> Self {
        Self::new(0, false)
    }
}

/// Shared behavior of all printers.
///
/// Implementors only supply their settings and the two output channels;
/// everything else is provided.
pub trait Printer {
    fn settings(&self) -> &PrinterSettings;

    fn settings_mut(&mut self) -> &mut PrinterSettings;

    /// Write already composed text to the normal channel.
    fn emit(&self, text: &str);

    /// Write already composed text to the error channel.
    fn emit_error(&self, text: &str) {
        self.emit(text);
    }

    fn level(&self) -> i32 {
        self.settings().level
    }

    fn set_level(&mut self, level: i32) {
        self.settings_mut().level = level;
    }

    fn is_logging_timestamps(&self) -> bool {
        self.settings().timestamping
    }

    fn set_timestamping(&mut self, flag: bool) {
        self.settings_mut().timestamping = flag;
    }

    fn date_format(&self) -> &DateFormat {
        &self.settings().date_format
    }

    fn set_date_format(&mut self, date_format: DateFormat) {
        self.settings_mut().date_format = date_format;
    }

    /// Debug output is on for any level above zero.
    fn is_logging_debug(&self) -> bool {
        self.level() > 0
    }

    /// A message of `level` passes when it does not exceed the printer's level.
    fn can_print(&self, level: i32) -> bool {
        self.level() >= level
    }

    /// The current local time in this printer's date format.
    fn date_formatted(&self) -> String {
        self.date_format().now()
    }

    fn print_timestamp(&self) {
        self.emit(&format!("{} ", self.date_formatted()));
    }

    fn print_error_timestamp(&self) {
        self.emit_error(&format!("{} ", self.date_formatted()));
    }

    fn print(&self, msg: impl Display) {
        self.emit(&self.settings().compose(&msg, None, false));
    }

    fn println(&self, msg: impl Display) {
        self.emit(&self.settings().compose(&msg, None, true));
    }

    fn error_print(&self, msg: impl Display) {
        self.emit_error(&self.settings().compose(&msg, None, false));
    }

    fn error_println(&self, msg: impl Display) {
        self.emit_error(&self.settings().compose(&msg, None, true));
    }

    fn debug_print(&self, msg: impl Display) {
        if self.is_logging_debug() {
            self.print(msg);
        }
    }

    fn debug_println(&self, msg: impl Display) {
        if self.is_logging_debug() {
            self.println(msg);
        }
    }

    /// Print `[ <level> ] <msg>` when debug is on and `level` passes.
    fn debug_print_at(&self, msg: impl Display, level: i32) {
        if self.is_logging_debug() && self.can_print(level) {
            self.emit(&self.settings().compose(&msg, Some(level), false));
        }
    }

    fn debug_println_at(&self, msg: impl Display, level: i32) {
        if self.is_logging_debug() && self.can_print(level) {
            self.emit(&self.settings().compose(&msg, Some(level), true));
        }
    }
}

/// Common `Display` body: `<Kind> | level: N | timestamping: B`.
pub(crate) fn describe(
    f: &mut fmt::Formatter<'_>,
    kind: &str,
    settings: &PrinterSettings,
) -> fmt::Result {
    write!(
        f,
        "{kind} | level: {} | timestamping: {}",
        settings.level, settings.timestamping
    )
}
