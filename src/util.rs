//! Common utilities

use std::sync::atomic::{AtomicBool, Ordering};

/// A monotonic one-shot cell.
///
/// Starts pending and transitions to resolved exactly once, never reset.
/// Every caller races through [`resolve`](ResolveOnce::resolve); exactly one
/// observes `true`.
#[derive(Debug)]
pub(crate) struct ResolveOnce {
    pending: AtomicBool,
}

impl ResolveOnce {
    pub fn new() -> Self {
        Self {
            pending: AtomicBool::new(true),
        }
    }

    /// Cheap check that does not attempt resolution
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Attempts to resolve the cell. Returns `true` for exactly one caller
    /// over the lifetime of the cell
    pub fn resolve(&self) -> bool {
        self.pending
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}
