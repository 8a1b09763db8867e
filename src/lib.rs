//! # jcdp
//!
//! Leveled, optionally timestamped debug printers for terminals and files.
//!
//! ## Overview
//!
//! jcdp provides:
//! - **Printers**: `FilePrinter` and `TerminalPrinter` share one `Printer`
//!   trait with `print`/`println`, error and level-gated debug variants
//! - **Shared file writers**: every printer configured with the same file
//!   appends through one lock-guarded `WriterHandle`, so lines never tear
//! - **Per-file locking**: a slow file never blocks writes to another file
//! - **Shutdown safety**: handles close exactly once on shutdown; writes that
//!   race the shutdown are dropped instead of failing
//! - **Configuration**: `PrinterConfig` from code, JSON or YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use jcdp::{DateFormat, FilePrinter, Printer, WriterRegistry};
//!
//! fn main() -> Result<(), jcdp::PrinterError> {
//!     let registry = Arc::new(WriterRegistry::new());
//!     let _guard = registry.shutdown_guard();
//!
//!     let app = FilePrinter::builder("app.log", 1, true)
//!         .with_format(DateFormat::pattern("yyyy-MM-dd")?)
//!         .with_registry(registry.clone())
//!         .build()?;
//!     let worker = FilePrinter::builder("app.log", 3, false)
//!         .with_registry(registry)
//!         .build()?;
//!
//!     app.println("hello");
//!     worker.debug_println_at("fine detail", 3);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `json` - load `PrinterConfig` from JSON (enabled by default)
//! - `yaml` - load `PrinterConfig` from YAML
//! - `miette` - Pretty error reporting with miette
//! - `cli` - the `jcdp_demo` binary
//!
//! ## Shutdown
//!
//! Rust has no process-exit hooks, so cleanup is tied to `Drop`: a
//! `ShutdownGuard` held in `main`, the registry itself, and every
//! `WriterHandle` flush and close on drop. A killed process or
//! `std::process::exit` skips all of them.

// Core modules
pub mod config;
pub mod error;
pub mod io;
pub mod printer;
pub mod writer;

// Re-exports for convenience
pub use config::PrinterConfig;
pub use error::PrinterError;
pub use io::{FileOutput, InMemorySink, OutputTarget, StderrOutput, StdoutOutput};
pub use printer::{
    DateFormat, FilePrinter, FilePrinterBuilder, LINE_SEPARATOR, Printer, PrinterSettings,
    TerminalPrinter, TerminalPrinterBuilder,
};
pub use writer::{ShutdownGuard, TargetFactory, WriterHandle, WriterRegistry, global_registry};

// Miette re-exports
#[cfg(feature = "miette")]
pub use error::PrinterDiagnostic;
