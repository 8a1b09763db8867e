//! Configuration types for printers.
//!
//! This module provides:
//! - `PrinterConfig`: serde-deserializable printer settings, loadable from
//!   JSON or YAML files

mod printer;

pub use printer::PrinterConfig;
