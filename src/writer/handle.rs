//! A single lock-guarded, append-only output stream.

use std::fmt;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::io::OutputTarget;

type Sink = BufWriter<Box<dyn Write + Send>>;

/// One open output stream bound to a key (normally an absolute file path).
///
/// All operations take the handle's own mutex, so writes to one handle are
/// totally ordered while writes to different handles never contend. The
/// handle moves from open to closed exactly once; after that, `write` and
/// `flush` are no-ops that report success.
pub struct WriterHandle {
    path: PathBuf,
    sink: Mutex<Option<Sink>>,
}

impl WriterHandle {
    /// Open `target` for appending and wrap it in a buffered, locked sink.
    pub fn from_target(path: impl Into<PathBuf>, target: &dyn OutputTarget) -> io::Result<Self> {
        let stream = target.open_append()?;
        Ok(Self {
            path: path.into(),
            sink: Mutex::new(Some(BufWriter::new(stream))),
        })
    }

    /// The key this handle was opened under.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the handle still accepts writes.
    pub fn is_open(&self) -> bool {
        self.lock().is_some()
    }

    /// Append `text` verbatim to the buffer.
    ///
    /// Silently ignored once the handle is closed.
    pub fn write(&self, text: &str) -> io::Result<()> {
        match self.lock().as_mut() {
            Some(sink) => sink.write_all(text.as_bytes()),
            None => Ok(()),
        }
    }

    /// Append `text` and flush it in one critical section.
    pub fn write_and_flush(&self, text: &str) -> io::Result<()> {
        match self.lock().as_mut() {
            Some(sink) => {
                sink.write_all(text.as_bytes())?;
                sink.flush()
            }
            None => Ok(()),
        }
    }

    /// Force buffered bytes down to the underlying stream.
    pub fn flush(&self) -> io::Result<()> {
        match self.lock().as_mut() {
            Some(sink) => sink.flush(),
            None => Ok(()),
        }
    }

    /// Flush and release the underlying stream, then mark the handle closed.
    ///
    /// Idempotent. I/O errors are swallowed: the stream is being torn down.
    /// The lock is held until the stream is released, so a concurrent
    /// `close` returns only after the final flush.
    pub fn close(&self) {
        let mut guard = self.lock();
        let Some(mut sink) = guard.take() else {
            return;
        };
        if let Err(e) = sink.flush() {
            tracing::debug!(path = %self.path.display(), error = %e, "flush on close failed");
        }
        drop(sink);
        drop(guard);
        tracing::debug!(path = %self.path.display(), "closed shared writer");
    }

    fn lock(&self) -> MutexGuard<'_, Option<Sink>> {
        self.sink.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for WriterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterHandle")
            .field("path", &self.path)
            .field("open", &self.is_open())
            .finish()
    }
}

impl Drop for WriterHandle {
    fn drop(&mut self) {
        self.close();
    }
}
