//! Path-keyed registry of shared writer handles.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use once_cell::sync::Lazy;

use super::WriterHandle;
use crate::error::PrinterError;
use crate::io::{FileOutput, OutputTarget};

/// Type alias for the function that turns a normalized path into a target.
///
/// The default opens real files; tests substitute in-memory or slow sinks.
pub type TargetFactory = Arc<dyn Fn(&Path) -> Arc<dyn OutputTarget> + Send + Sync>;

/// Registry that hands out one shared `WriterHandle` per absolute path.
///
/// Several printers configured with the same file end up appending through
/// the same handle, so their lines are serialized instead of racing on
/// separate file descriptors. Entries are created lazily and never removed;
/// `shutdown` closes them all.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use jcdp::WriterRegistry;
///
/// let registry = Arc::new(WriterRegistry::new());
/// let _guard = registry.shutdown_guard();
///
/// let a = registry.acquire("app.log")?;
/// let b = registry.acquire("./app.log")?;
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
pub struct WriterRegistry {
    handles: RwLock<HashMap<PathBuf, Arc<WriterHandle>>>,
    factory: TargetFactory,
}

impl WriterRegistry {
    /// Create an empty registry that opens files on disk.
    pub fn new() -> Self {
        Self::with_target_factory(|path: &Path| -> Arc<dyn OutputTarget> {
            Arc::new(FileOutput::new(path.to_path_buf()))
        })
    }

    /// Create an empty registry with a custom path-to-target function.
    pub fn with_target_factory<F>(factory: F) -> Self
    where
        F: Fn(&Path) -> Arc<dyn OutputTarget> + Send + Sync + 'static,
    {
        Self {
            handles: RwLock::new(HashMap::new()),
            factory: Arc::new(factory),
        }
    }

    /// Return the handle for `path`, opening it in append mode on first use.
    ///
    /// The path is made absolute before lookup, so relative and absolute
    /// spellings of the same file share a handle. Open failures are returned
    /// as `PrinterError::Open` and leave no entry behind.
    ///
    /// The target is opened without holding the map lock, so a slow open
    /// never stalls lookups of other paths. When two threads race on a new
    /// path, the first insert wins and the other handle is closed unused.
    pub fn acquire(&self, path: impl AsRef<Path>) -> Result<Arc<WriterHandle>, PrinterError> {
        let key = normalize(path.as_ref())?;

        if let Some(handle) = self.read().get(&key) {
            tracing::trace!(path = %key.display(), "reusing shared writer");
            return Ok(Arc::clone(handle));
        }

        let target = (self.factory)(&key);
        let opened = WriterHandle::from_target(key.clone(), target.as_ref()).map_err(|source| {
            PrinterError::Open {
                path: key.clone(),
                source,
            }
        })?;

        let mut handles = self.write();
        match handles.entry(key) {
            Entry::Occupied(entry) => {
                tracing::trace!(path = %entry.key().display(), "lost open race, reusing writer");
                Ok(Arc::clone(entry.get()))
            }
            Entry::Vacant(entry) => {
                tracing::debug!(
                    path = %entry.key().display(),
                    output = target.id(),
                    "opened shared writer"
                );
                Ok(Arc::clone(entry.insert(Arc::new(opened))))
            }
        }
    }

    /// Look up an existing handle without opening anything.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<Arc<WriterHandle>> {
        let key = normalize(path.as_ref()).ok()?;
        self.read().get(&key).cloned()
    }

    /// All registered absolute paths.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.read().keys().cloned().collect()
    }

    /// Number of registered handles.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if no handle was ever acquired.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Close every registered handle. Safe to call more than once.
    pub fn shutdown(&self) {
        // Snapshot so the map lock is not held while closing.
        let handles: Vec<Arc<WriterHandle>> = self.read().values().cloned().collect();
        for handle in handles {
            handle.close();
        }
    }

    /// Guard that shuts the registry down when dropped.
    ///
    /// Keep it alive for the duration of `main`. Abrupt termination (a
    /// killed process, `std::process::exit`) skips it.
    pub fn shutdown_guard(self: &Arc<Self>) -> ShutdownGuard {
        ShutdownGuard {
            registry: Arc::clone(self),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<PathBuf, Arc<WriterHandle>>> {
        self.handles.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<PathBuf, Arc<WriterHandle>>> {
        self.handles.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for WriterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WriterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterRegistry")
            .field("paths", &self.paths())
            .finish()
    }
}

impl Drop for WriterRegistry {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Closes all handles of a registry when dropped.
#[must_use = "the registry is shut down as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ShutdownGuard {
    registry: Arc<WriterRegistry>,
}

impl ShutdownGuard {
    /// The registry this guard will shut down.
    pub fn registry(&self) -> &Arc<WriterRegistry> {
        &self.registry
    }
}

impl Drop for ShutdownGuard {
    fn drop(&mut self) {
        self.registry.shutdown();
    }
}

fn normalize(path: &Path) -> Result<PathBuf, PrinterError> {
    std::path::absolute(path).map_err(|source| PrinterError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Process-wide registry used by printers that are not given one.
static GLOBAL_REGISTRY: Lazy<Arc<WriterRegistry>> = Lazy::new(|| Arc::new(WriterRegistry::new()));

/// Get the process-wide writer registry.
///
/// Statics are never dropped, so pair it with `shutdown_guard()` in `main`
/// to get buffered output flushed on exit.
pub fn global_registry() -> Arc<WriterRegistry> {
    GLOBAL_REGISTRY.clone()
}
