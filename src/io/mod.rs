//! Output targets that a `WriterHandle` can be bound to.
//!
//! This module provides:
//! - `OutputTarget`: Trait for append-only output destinations
//! - Standard implementations for files and stdout/stderr
//! - An in-memory implementation for testing

mod memory;
mod output;
mod std_io;

pub use memory::InMemorySink;
pub use output::OutputTarget;
pub use std_io::{FileOutput, StderrOutput, StdoutOutput};
