//! Output target trait definition.

use std::fmt::Debug;
use std::io::Write;

/// Trait for append-only output destinations.
///
/// Implementors provide a way to open a writable stream to files,
/// stdout/stderr, or in-memory buffers. A `WriterHandle` opens its target
/// exactly once and keeps the stream until it is closed.
pub trait OutputTarget: Send + Sync + Debug {
    /// Returns a unique identifier for this output target.
    ///
    /// Convention: "-" for stdout, "stderr" for stderr, file path for files.
    fn id(&self) -> &str;

    /// Open the target for appending to existing content.
    fn open_append(&self) -> std::io::Result<Box<dyn Write + Send>>;
}
