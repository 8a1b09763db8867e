//! Shared, lock-guarded file writers.
//!
//! This module provides:
//! - `WriterHandle`: one buffered append-only stream behind its own mutex
//! - `WriterRegistry`: path-keyed store that hands out one handle per file
//! - `ShutdownGuard`: closes every handle of a registry when dropped
//! - `global_registry`: the process-wide registry

mod handle;
mod registry;

pub use handle::WriterHandle;
pub use registry::{ShutdownGuard, TargetFactory, WriterRegistry, global_registry};
